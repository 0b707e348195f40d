use std::time::Duration;
use thiserror::Error;

/// Failure classification for a single sub-dictionary call.
///
/// The retry policy treats every variant the same way; the classification only
/// exists so callers and logs can tell what went wrong.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The remote host could not be reached (DNS, connect, reset).
    #[error("transport error: {0}")]
    Transport(String),
    /// The call exceeded its deadline.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    /// Non-success HTTP status.
    #[error("remote returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },
    /// Success status, but the body is not a payload we understand.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Short, stable label for logs and stats.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Timeout(_) => "timeout",
            FetchError::Remote { .. } | FetchError::Malformed(_) => "remote",
        }
    }
}

impl FetchError {
    /// Classifies a client error. `deadline` is the limit that applies when
    /// the client reports a timeout.
    pub(crate) fn from_reqwest(err: reqwest::Error, deadline: Duration) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(deadline)
        } else if let Some(status) = err.status() {
            FetchError::Remote {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = FetchError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "request timed out after 1500ms");

        let err = FetchError::Remote {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn kinds_group_remote_failures() {
        assert_eq!(FetchError::Transport("reset".into()).kind(), "transport");
        assert_eq!(FetchError::Timeout(Duration::ZERO).kind(), "timeout");
        assert_eq!(FetchError::Malformed("x".into()).kind(), "remote");
        assert_eq!(
            FetchError::Remote {
                status: 500,
                message: String::new()
            }
            .kind(),
            "remote"
        );
    }

    #[test]
    fn json_errors_are_malformed() {
        let err: FetchError = serde_json::from_str::<serde_json::Value>("{nope")
            .unwrap_err()
            .into();
        assert!(matches!(err, FetchError::Malformed(_)));
    }
}
