mod model;
mod preprocess;

pub use model::{Entry, FromWord, Section, ToWord, Translation};
pub use preprocess::{DefaultPreprocessor, Preprocessor};

pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Look up a single word for the given language pair.
    ///
    /// A word the provider has no entry for is reported as
    /// [`TranslateError::NotFound`], never as an empty result.
    async fn translate(
        &self,
        word: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub homepage: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("No translation found for {word}: {message}")]
    NotFound { word: String, message: String },

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedLanguagePair { from: String, to: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),
}

impl TranslateError {
    pub fn not_found(word: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            word: word.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
