use serde::{Deserialize, Serialize};

/// Limits for the approximate matching operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Spelling suggestions returned per unknown word.
    #[serde(default = "MatchingConfig::default_suggestion_count")]
    pub suggestion_count: usize,
    /// Upper bound on the caller-supplied similar-words limit.
    #[serde(default = "MatchingConfig::default_max_similar")]
    pub max_similar: usize,
    /// Longest accepted wildcard pattern, in characters, length clause excluded.
    #[serde(default = "MatchingConfig::default_max_pattern_len")]
    pub max_pattern_len: usize,
    #[serde(default = "MatchingConfig::default_max_wildcard_results")]
    pub max_wildcard_results: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            suggestion_count: Self::default_suggestion_count(),
            max_similar: Self::default_max_similar(),
            max_pattern_len: Self::default_max_pattern_len(),
            max_wildcard_results: Self::default_max_wildcard_results(),
        }
    }
}

impl MatchingConfig {
    fn default_suggestion_count() -> usize {
        5
    }

    fn default_max_similar() -> usize {
        50
    }

    fn default_max_pattern_len() -> usize {
        64
    }

    fn default_max_wildcard_results() -> usize {
        100
    }

    pub fn with_suggestion_count(mut self, count: usize) -> Self {
        self.suggestion_count = count;
        self
    }

    pub fn with_max_similar(mut self, max: usize) -> Self {
        self.max_similar = max;
        self
    }

    pub fn with_max_pattern_len(mut self, max: usize) -> Self {
        self.max_pattern_len = max;
        self
    }

    pub fn with_max_wildcard_results(mut self, max: usize) -> Self {
        self.max_wildcard_results = max;
        self
    }
}
