use std::io::Write;

use anyhow::{Context, bail};
use palabra_anki::{AnkiConnectClient, CardTemplate, add_card};
use palabra_phrases::{ChatClient, Phrase, generate_phrases};
use palabra_translator::{
    DefaultPreprocessor, Entry, LanguageCode, Preprocessor, Translation, Translator,
};
use serde_json::{Value, json};

use crate::cli::AnkiCommand;
use crate::editor::{CardText, edit_card};

/// Collaborators the anki commands need
pub struct AnkiContext<'a> {
    pub client: &'a AnkiConnectClient,
    pub template: &'a CardTemplate,
    pub translator: &'a dyn Translator,
    pub chat: &'a ChatClient,
    pub from: LanguageCode,
    pub to: LanguageCode,
    /// Editor command used by `--edit`
    pub editor: &'a str,
    /// Sentences generated when `--count` is not given
    pub phrase_count: usize,
}

pub async fn run<W: Write>(
    command: AnkiCommand,
    ctx: &AnkiContext<'_>,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        AnkiCommand::Invoke { action, params } => {
            let params: Value = match params {
                Some(raw) => serde_json::from_str(&raw).context("PARAMS must be valid JSON")?,
                None => json!({}),
            };
            let result = ctx.client.invoke(&action, params).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        }
        AnkiCommand::Decks => {
            for deck in ctx.client.deck_names().await? {
                writeln!(out, "{deck}")?;
            }
        }
        AnkiCommand::Models => {
            for model in ctx.client.model_names().await? {
                writeln!(out, "{model}")?;
            }
        }
        AnkiCommand::Add {
            word,
            indexes,
            edit,
        } => add_cards(ctx, &word, &indexes, edit, out).await?,
        AnkiCommand::Phrases {
            word,
            index,
            count,
            add,
            edit,
        } => {
            let count = count.unwrap_or(ctx.phrase_count);
            phrases(ctx, &word, index, count, &add, edit, out).await?
        }
    }

    Ok(())
}

/// Look `word` up and add one card per selected entry.
///
/// Every index is checked before anything is sent.
async fn add_cards<W: Write>(
    ctx: &AnkiContext<'_>,
    word: &str,
    indexes: &[usize],
    edit: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let Some(translation) = look_up(ctx, word, out).await? else {
        return Ok(());
    };

    let entries = indexes
        .iter()
        .map(|&index| select_entry(&translation, index))
        .collect::<anyhow::Result<Vec<&Entry>>>()?;

    for (n, entry) in entries.into_iter().enumerate() {
        let card = CardText {
            front: ctx.template.format_front(entry),
            back: ctx.template.format_back(entry),
        };
        create_card(ctx, card, edit, n + 1, &entry.from_word.to_string(), out).await?;
    }

    Ok(())
}

/// Generate example sentences for one entry, print them numbered and add the selected ones
async fn phrases<W: Write>(
    ctx: &AnkiContext<'_>,
    word: &str,
    index: usize,
    count: usize,
    selected: &[usize],
    edit: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let Some(translation) = look_up(ctx, word, out).await? else {
        return Ok(());
    };
    let entry = select_entry(&translation, index)?;

    let phrases = generate_phrases(ctx.chat, entry, count, &ctx.from, &ctx.to)
        .await
        .with_context(|| format!("failed to generate phrases for {}", entry.from_word))?;
    if phrases.is_empty() {
        writeln!(out, "No phrases generated for {}", entry.from_word)?;
        return Ok(());
    }

    for (n, phrase) in phrases.iter().enumerate() {
        writeln!(out, "  {}. {} — {}", n + 1, phrase.source, phrase.target)?;
    }

    let chosen = selected
        .iter()
        .map(|&n| {
            n.checked_sub(1)
                .and_then(|i| phrases.get(i))
                .with_context(|| format!("invalid phrase index: {n} (must be 1-{})", phrases.len()))
        })
        .collect::<anyhow::Result<Vec<&Phrase>>>()?;

    for (n, phrase) in chosen.into_iter().enumerate() {
        let card = CardText {
            front: phrase.source.clone(),
            back: phrase.target.clone(),
        };
        create_card(ctx, card, edit, n + 1, &phrase.source, out).await?;
    }

    Ok(())
}

/// Normalized lookup; `None` once a not-found message has been printed
async fn look_up<W: Write>(
    ctx: &AnkiContext<'_>,
    word: &str,
    out: &mut W,
) -> anyhow::Result<Option<Translation>> {
    let word = DefaultPreprocessor.process(word);
    if word.is_empty() {
        bail!("word must not be blank");
    }

    match ctx
        .translator
        .translate(&word, ctx.from.clone(), ctx.to.clone())
        .await
    {
        Ok(translation) => Ok(Some(translation)),
        Err(e) if e.is_not_found() => {
            writeln!(out, "No translation found for {word}")?;
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("failed to look up {word}")),
    }
}

fn select_entry(translation: &Translation, index: usize) -> anyhow::Result<&Entry> {
    translation
        .entry(index)
        .with_context(|| format!("invalid index: {index}"))
}

async fn create_card<W: Write>(
    ctx: &AnkiContext<'_>,
    card: CardText,
    edit: bool,
    n: usize,
    label: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let card = if edit {
        match edit_card(ctx.editor, &card)? {
            Some(card) => card,
            None => {
                writeln!(out, "Skipped card {n} for {label}")?;
                return Ok(());
            }
        }
    } else {
        card
    };

    let note_id = add_card(ctx.client, ctx.template, &card.front, &card.back)
        .await
        .with_context(|| format!("failed to create card for {label}"))?;
    tracing::info!(note_id, "card created");
    writeln!(out, "Created card {n} for {label} (note {note_id})")?;
    Ok(())
}
