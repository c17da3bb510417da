use std::env;

use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::display::DisplayConfig;
use self::phrases::PhrasesConfig;
use self::translator::TranslatorConfig;

pub mod anki;
pub mod display;
pub mod phrases;
pub mod translator;

pub use self::display::ColorMode;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub anki: AnkiConfig,
    pub display: DisplayConfig,
    pub phrases: PhrasesConfig,

    /// Program cards are edited with before they are added
    pub editor: String,
    /// Timeout for every outgoing HTTP request
    pub timeout_seconds: u64,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Config {
    /// Build the config from environment variables, falling back to defaults
    pub fn new() -> Self {
        let timeout_seconds = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30); // 30 seconds default

        let log_json = env::var("LOG_JSON")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        let editor = pick_editor(env::var("EDITOR").ok(), env::var("VISUAL").ok());

        Config {
            translator: TranslatorConfig::new(),
            anki: AnkiConfig::new(),
            display: DisplayConfig::new(),
            phrases: PhrasesConfig::new(),

            editor,

            timeout_seconds,
            log_json,
        }
    }
}

/// `EDITOR`, then `VISUAL`, then `vi`; empty values count as unset
fn pick_editor(editor: Option<String>, visual: Option<String>) -> String {
    editor
        .into_iter()
        .chain(visual)
        .find(|program| !program.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}
