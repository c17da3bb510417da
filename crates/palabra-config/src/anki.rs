use std::env;

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "http://127.0.0.1:8765".to_string()
}

fn default_deck() -> String {
    "Spanish".to_string()
}

fn default_model() -> String {
    "Basic".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AnkiConfig {
    /// AnkiConnect URL
    #[serde(default = "default_url")]
    pub url: String,
    /// Deck new cards go to
    #[serde(default = "default_deck")]
    pub deck: String,
    /// Note type of new cards
    #[serde(default = "default_model")]
    pub model: String,
}

impl AnkiConfig {
    pub fn new() -> Self {
        Self {
            url: env::var("ANKI_URL").unwrap_or_else(|_| default_url()),
            deck: env::var("ANKI_DECK").unwrap_or_else(|_| default_deck()),
            model: env::var("ANKI_MODEL").unwrap_or_else(|_| default_model()),
        }
    }
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            deck: default_deck(),
            model: default_model(),
        }
    }
}
