use std::env;

use serde::{Deserialize, Serialize};

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "es".to_string()
}

fn default_provider_url() -> String {
    "https://www.wordreference.com/".to_string()
}

fn default_user_agent() -> String {
    concat!("palabra/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    #[serde(default = "default_provider_url")]
    pub provider_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        Self {
            from_lang: env::var("PALABRA_FROM_LANG").unwrap_or(defaults.from_lang),
            to_lang: env::var("PALABRA_TO_LANG").unwrap_or(defaults.to_lang),
            provider_url: env::var("PALABRA_PROVIDER_URL").unwrap_or(defaults.provider_url),
            user_agent: env::var("PALABRA_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            provider_url: default_provider_url(),
            user_agent: default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: TranslatorConfig = serde_json::from_str(r#"{"to_lang": "fr"}"#).unwrap();
        assert_eq!(config.from_lang, "en");
        assert_eq!(config.to_lang, "fr");
        assert_eq!(config.provider_url, "https://www.wordreference.com/");
        assert!(config.user_agent.starts_with("palabra/"));
    }
}
