use fetch::FetchError;
use matcher::PatternError;
use normalize::NormalizeError;
use thiserror::Error;

use crate::config::ConfigLoadError;

/// Errors surfaced by [`Dictionary`](crate::Dictionary) operations.
///
/// Sub-dictionary failures never appear here for lookups; they are absorbed
/// into the record's `complete` flag. Only invalid input, setup problems and
/// the standalone daily-word fetch can fail.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] PatternError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("transport setup failed: {0}")]
    Transport(FetchError),

    #[error("remote content unavailable: {0}")]
    Unavailable(FetchError),
}

impl From<NormalizeError> for DictionaryError {
    fn from(err: NormalizeError) -> Self {
        DictionaryError::Validation(err.to_string())
    }
}

impl DictionaryError {
    /// True for errors caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DictionaryError::Validation(_) | DictionaryError::Pattern(_)
        )
    }
}
