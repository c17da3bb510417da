use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_count() -> usize {
    5
}

/// Chat-completion settings used to generate example sentences
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PhrasesConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Unset until phrases are actually requested
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Sentences asked for per entry
    #[serde(default = "default_count")]
    pub count: usize,
}

impl PhrasesConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        Self {
            api_url: env::var("OPENAI_API_URL").unwrap_or(defaults.api_url),
            api_key: env::var("OPENAI_API_KEY").ok(),
            model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            count: env::var("PALABRA_PHRASE_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&count| count > 0)
                .unwrap_or(defaults.count),
        }
    }
}

impl Default for PhrasesConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            model: default_model(),
            count: default_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PhrasesConfig = serde_json::from_str(r#"{"count": 3}"#).unwrap();
        assert_eq!(config.count, 3);
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.api_key.is_none());
        assert!(config.api_url.ends_with("/v1/chat/completions"));
    }
}
