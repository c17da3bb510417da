use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::AnkiError;

/// Envelope version understood by AnkiConnect
pub const API_VERSION: u32 = 6;

#[derive(Clone)]
pub struct AnkiConnectClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnkiConnectClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Client whose requests give up after `timeout`
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, AnkiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    /// Check if AnkiConnect is available
    pub async fn version(&self) -> Result<u32, AnkiError> {
        self.invoke_as("version", json!({})).await
    }

    /// Get list of deck names
    pub async fn deck_names(&self) -> Result<Vec<String>, AnkiError> {
        self.invoke_as("deckNames", json!({})).await
    }

    /// Get list of model (note type) names
    pub async fn model_names(&self) -> Result<Vec<String>, AnkiError> {
        self.invoke_as("modelNames", json!({})).await
    }

    /// Card ids matching an Anki search query, e.g. `deck:current`
    pub async fn find_cards(&self, query: &str) -> Result<Vec<u64>, AnkiError> {
        self.invoke_as("findCards", json!({ "query": query })).await
    }

    /// Add a note to Anki, returning the new note id
    pub async fn add_note(
        &self,
        deck: &str,
        model: &str,
        fields: &Map<String, Value>,
        tags: &[&str],
    ) -> Result<u64, AnkiError> {
        let params = json!({
            "note": {
                "deckName": deck,
                "modelName": model,
                "fields": fields,
                "tags": tags,
            }
        });

        self.invoke_as("addNote", params).await
    }

    /// Invoke an action and deserialize its result
    pub async fn invoke_as<T>(&self, action: &str, params: Value) -> Result<T, AnkiError>
    where
        T: DeserializeOwned,
    {
        let result = self.invoke(action, params).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Invoke an AnkiConnect API action and return the unwrapped `result`
    pub async fn invoke(&self, action: &str, params: Value) -> Result<Value, AnkiError> {
        let request = request(action, params)?;
        tracing::info!(action, url = %self.base_url, "invoking AnkiConnect");

        let body = serde_json::to_vec(&request)?;
        let response = self
            .client
            .post(&self.base_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let bytes = response.bytes().await?;
        let envelope: Value = serde_json::from_slice(&bytes)?;

        unwrap_response(envelope).inspect_err(|e| {
            tracing::warn!(action, "AnkiConnect call failed: {e}");
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AnkiRequest {
    pub action: String,
    pub params: Map<String, Value>,
    pub version: u32,
}

/// Build a request envelope; `params` must be a JSON object
pub fn request(action: &str, params: Value) -> Result<AnkiRequest, AnkiError> {
    let params = match params {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => return Err(AnkiError::InvalidParams(other.to_string())),
    };

    Ok(AnkiRequest {
        action: action.to_string(),
        params,
        version: API_VERSION,
    })
}

/// Validate a response envelope and extract its `result`.
///
/// The shape is checked before any value is looked at: exactly the two keys
/// `error` and `result`.
pub fn unwrap_response(response: Value) -> Result<Value, AnkiError> {
    let Value::Object(mut fields) = response else {
        return Err(AnkiError::MalformedResponse(
            "response is not a JSON object".to_string(),
        ));
    };

    if fields.len() != 2 {
        return Err(AnkiError::MalformedResponse(
            "response has an unexpected number of fields".to_string(),
        ));
    }
    if !fields.contains_key("error") {
        return Err(AnkiError::MalformedResponse(
            "response is missing required error field".to_string(),
        ));
    }
    if !fields.contains_key("result") {
        return Err(AnkiError::MalformedResponse(
            "response is missing required result field".to_string(),
        ));
    }

    match fields.remove("error") {
        Some(Value::Null) | None => {}
        Some(Value::String(message)) => return Err(AnkiError::RemoteError(message)),
        Some(other) => return Err(AnkiError::RemoteError(other.to_string())),
    }

    Ok(fields.remove("result").unwrap_or(Value::Null))
}
