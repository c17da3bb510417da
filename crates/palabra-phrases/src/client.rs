use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::PhraseError;

pub const DEFAULT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Minimal client for an OpenAI-compatible chat completions endpoint
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

impl ChatClient {
    pub fn new(
        url: String,
        api_key: Option<String>,
        model: String,
        timeout: Duration,
    ) -> Result<Self, PhraseError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            api_key,
            model,
        })
    }

    /// Send one system and one user message, return the first choice's text
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, PhraseError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(PhraseError::MissingApiKey)?;

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        tracing::info!(model = %self.model, url = %self.url, "requesting chat completion");
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        // Read as text first so error bodies are not lost to a JSON failure
        let text = response.text().await?;
        if !status.is_success() {
            return Err(PhraseError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let completion: Completion = serde_json::from_str(&text)?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(PhraseError::EmptyResponse)
    }
}
