use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use palabra_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};
use reqwest::{StatusCode, Url};

use crate::dictionaries::{Dictionary, parse_dictionaries};
use crate::parser::parse_translation;

pub const DEFAULT_URL: &str = "https://www.wordreference.com/";

#[derive(Clone)]
pub struct WordReference {
    client: reqwest::Client,
    base_url: String,
}

impl WordReference {
    pub fn new(
        base_url: String,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Page URL for `word` in the `from`→`to` dictionary, e.g. `.../enes/house`
    pub fn lookup_url(&self, word: &str, from: &str, to: &str) -> Result<Url, TranslateError> {
        let dict_code = dict_code(from, to)?;
        let mut url =
            Url::parse(&self.base_url).map_err(|e| TranslateError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| TranslateError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(&dict_code)
            .push(word);

        Ok(url)
    }

    /// Dictionaries offered by the site, optionally filtered by code or language name
    pub async fn available_dictionaries(
        &self,
        filter: Option<&str>,
    ) -> Result<BTreeMap<String, Dictionary>, TranslateError> {
        tracing::debug!(url = %self.base_url, "fetching dictionary list");
        let response = self.client.get(&self.base_url).send().await?;
        let response = check_status(response, "")?;
        let body = response.text().await?;

        parse_dictionaries(&body, filter)
    }
}

#[async_trait]
impl Translator for WordReference {
    async fn translate(
        &self,
        word: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let url = self.lookup_url(word, &from, &to)?;
        tracing::debug!(%url, "looking up word");

        let response = self.client.get(url.clone()).send().await?;
        let response = check_status(response, word)?;
        let body = response.text().await?;

        parse_translation(&body, word, &from, &to, url.as_str())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "WordReference".to_string(),
            homepage: self.base_url.clone(),
        }
    }
}

fn check_status(response: reqwest::Response, word: &str) -> Result<reqwest::Response, TranslateError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(TranslateError::not_found(word, "page not found")),
        StatusCode::TOO_MANY_REQUESTS => Err(TranslateError::RateLimitExceeded),
        status => Err(TranslateError::ApiError(format!("HTTP {status}"))),
    }
}

/// Two-letter codes joined, e.g. `en` + `es` → `enes`
fn dict_code(from: &str, to: &str) -> Result<String, TranslateError> {
    let valid = |code: &str| code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic());
    if !valid(from) || !valid(to) {
        return Err(TranslateError::UnsupportedLanguagePair {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    Ok(format!("{from}{to}").to_lowercase())
}
