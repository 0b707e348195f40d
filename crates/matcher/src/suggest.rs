//! Shared-substring heuristic behind spelling suggestions and similar words.
//!
//! A candidate qualifies when it starts with the input's first three
//! characters, or contains the input's characters 2 to 4. No edit distance is
//! computed and nothing is reordered: qualifying candidates keep pool order,
//! which keeps results reproducible for a fixed pool.

use normalize::normalize_term;
use serde::{Deserialize, Serialize};

use crate::pool::CandidatePool;

const PREFIX_CHARS: usize = 3;
const MIDDLE_START: usize = 1;
const MIDDLE_END: usize = 4;

/// Score for a candidate sharing the input's prefix.
pub const PREFIX_SCORE: u8 = 2;
/// Score for a candidate sharing only the middle substring.
pub const MIDDLE_SCORE: u8 = 1;

/// One scored candidate. Transient, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionCandidate {
    pub term: String,
    pub score: u8,
    /// 1-based position in the result list.
    pub rank: usize,
}

/// The substrings one input is compared by.
struct Query {
    term: String,
    prefix: String,
    middle: Option<String>,
}

impl Query {
    fn new(raw: &str) -> Option<Self> {
        let term = normalize_term(raw);
        if term.is_empty() {
            return None;
        }
        let chars: Vec<char> = term.chars().collect();
        let prefix = chars.iter().take(PREFIX_CHARS).collect();
        let middle = (chars.len() >= MIDDLE_END)
            .then(|| chars[MIDDLE_START..MIDDLE_END].iter().collect());
        Some(Self {
            term,
            prefix,
            middle,
        })
    }

    fn score(&self, candidate: &str) -> Option<u8> {
        if candidate == self.term {
            return None;
        }
        if candidate.starts_with(&self.prefix) {
            return Some(PREFIX_SCORE);
        }
        match &self.middle {
            Some(middle) if candidate.contains(middle.as_str()) => Some(MIDDLE_SCORE),
            _ => None,
        }
    }

    fn first_char(&self) -> Option<char> {
        self.term.chars().next()
    }
}

/// Up to `count` corrections for `term`, in pool order.
pub fn spelling_suggestions(
    term: &str,
    pool: &CandidatePool,
    count: usize,
) -> Vec<SuggestionCandidate> {
    let Some(query) = Query::new(term) else {
        return Vec::new();
    };
    pool.iter()
        .filter_map(|candidate| query.score(candidate).map(|score| (candidate, score)))
        .take(count)
        .enumerate()
        .map(|(i, (candidate, score))| SuggestionCandidate {
            term: candidate.to_string(),
            score,
            rank: i + 1,
        })
        .collect()
}

/// Up to `limit` pool terms sharing `term`'s first letter and substring rule.
pub fn similar_words(term: &str, pool: &CandidatePool, limit: usize) -> Vec<String> {
    let Some(query) = Query::new(term) else {
        return Vec::new();
    };
    let Some(first) = query.first_char() else {
        return Vec::new();
    };
    pool.iter()
        .filter(|candidate| candidate.starts_with(first))
        .filter(|candidate| query.score(candidate).is_some())
        .take(limit)
        .map(str::to_string)
        .collect()
}
