mod client;
mod template;

pub use client::{API_VERSION, AnkiConnectClient, AnkiRequest, request, unwrap_response};
pub use template::CardTemplate;

use palabra_translator::Entry;
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum AnkiError {
    #[error("Malformed AnkiConnect response: {0}")]
    MalformedResponse(String),

    #[error("AnkiConnect error: {0}")]
    RemoteError(String),

    #[error("Params must be a JSON object, got {0}")]
    InvalidParams(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Add a card for a dictionary entry using the provided client and template
pub async fn add_entry_card(
    client: &AnkiConnectClient,
    template: &CardTemplate,
    entry: &Entry,
) -> Result<u64, AnkiError> {
    add_card(
        client,
        template,
        &template.format_front(entry),
        &template.format_back(entry),
    )
    .await
}

/// Add a `Front`/`Back` note to the template's deck, tagged `palabra`
pub async fn add_card(
    client: &AnkiConnectClient,
    template: &CardTemplate,
    front: &str,
    back: &str,
) -> Result<u64, AnkiError> {
    let mut fields = Map::new();
    fields.insert("Front".to_string(), Value::String(front.to_string()));
    fields.insert("Back".to_string(), Value::String(back.to_string()));

    client
        .add_note(&template.deck, &template.model, &fields, &["palabra"])
        .await
}
