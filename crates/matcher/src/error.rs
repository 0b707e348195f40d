use thiserror::Error;

/// Why a wildcard pattern was rejected.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,
    #[error("invalid length clause `{0}`: expected a positive integer after ','")]
    InvalidLength(String),
    #[error("pattern has {len} characters, limit is {max}")]
    TooLong { len: usize, max: usize },
    #[error("failed to build matcher: {0}")]
    Regex(#[from] regex::Error),
}
