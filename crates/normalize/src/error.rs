use thiserror::Error;

/// Errors that can occur while turning raw input into a lookup term.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("search term empty after normalization")]
    EmptyInput,
}
