use std::io;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use palabra_anki::{AnkiConnectClient, CardTemplate};
use palabra_config::Config;
use palabra_phrases::ChatClient;
use palabra_provider_wordreference::WordReference;
use palabra_translator::Translator;
use tokio::signal;

pub mod anki;
pub mod cli;
pub mod editor;
pub mod logging;
pub mod lookup;
pub mod render;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Command};
use self::lookup::Lookup;
use self::render::Renderer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::new();
    logging::init(config.log_json);

    let timeout = Duration::from_secs(config.timeout_seconds);
    let provider = WordReference::new(
        config.translator.provider_url.clone(),
        &config.translator.user_agent,
        timeout,
    )
    .context("failed to build WordReference client")?;
    tracing::debug!(provider = provider.metadata().name, "provider ready");

    let from = cli.from.clone().unwrap_or_else(|| config.translator.from_lang.clone());
    let to = cli.to.clone().unwrap_or_else(|| config.translator.to_lang.clone());
    let mut stdout = io::stdout();

    match cli.command {
        Some(Command::Dicts { filter }) => {
            let dictionaries = provider.available_dictionaries(filter.as_deref()).await?;
            for (code, dictionary) in dictionaries {
                println!("{code}  {} → {}", dictionary.from, dictionary.to);
            }
            Ok(())
        }
        Some(Command::Anki { command }) => {
            let client = AnkiConnectClient::with_timeout(config.anki.url.clone(), timeout)
                .context("failed to build AnkiConnect client")?;
            let template = CardTemplate::vocabulary(config.anki.deck.clone(), config.anki.model.clone());
            let chat = ChatClient::new(
                config.phrases.api_url.clone(),
                config.phrases.api_key.clone(),
                config.phrases.model.clone(),
                timeout,
            )
            .context("failed to build chat client")?;
            let ctx = anki::AnkiContext {
                client: &client,
                template: &template,
                translator: &provider,
                chat: &chat,
                from,
                to,
                editor: &config.editor,
                phrase_count: config.phrases.count,
            };
            anki::run(command, &ctx, &mut stdout).await
        }
        None => {
            let color = cli.color.unwrap_or(config.display.color);
            let renderer = Renderer::new(color.enabled(atty::is(atty::Stream::Stdout)));
            let mut lookup = Lookup::new(&provider, from, to, renderer, stdout).json(cli.json);

            match cli.word {
                Some(word) => lookup.lookup(&word).await.map(|_| ()),
                None => {
                    let lines = lookup::spawn_line_reader(io::BufReader::new(io::stdin()));
                    lookup.interactive(lines, interrupted()).await
                }
            }
        }
    }
}

/// Resolves on Ctrl+C
async fn interrupted() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl+c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
