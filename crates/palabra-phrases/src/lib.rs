//! Example sentences for a dictionary entry, generated by a chat-completion API.

mod client;
mod phrase;

pub use client::{ChatClient, DEFAULT_MODEL, DEFAULT_URL};
pub use phrase::{Phrase, parse_phrases, prompt_for};

use palabra_translator::Entry;

#[derive(Debug, thiserror::Error)]
pub enum PhraseError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("Chat API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Chat API returned no choices")]
    EmptyResponse,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Ask for `count` sentences using `entry` and parse the reply.
///
/// `from` is the language of the sentences, `to` the language of their translations.
pub async fn generate_phrases(
    client: &ChatClient,
    entry: &Entry,
    count: usize,
    from: &str,
    to: &str,
) -> Result<Vec<Phrase>, PhraseError> {
    let (system, user) = prompt_for(entry, count, from, to);
    let reply = client.complete(&system, &user).await?;

    let phrases = parse_phrases(&reply);
    tracing::debug!(requested = count, parsed = phrases.len(), "phrases generated");
    Ok(phrases)
}

#[cfg(test)]
mod tests;
