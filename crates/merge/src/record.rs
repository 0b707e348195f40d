//! The aggregated record and its parts.

use chrono::{DateTime, Utc};
use fetch::SubDictionary;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::category::Category;

/// A usage example attached to a sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// One numbered meaning of the headword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub number: u32,
    pub text: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub examples: Vec<Example>,
}

/// A proverb or idiom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub text: String,
    #[serde(default)]
    pub meaning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pronunciation {
    pub code: String,
    pub audio_url: String,
}

/// A sub-dictionary that did not answer, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSource {
    pub source: SubDictionary,
    /// `transport`, `timeout` or `remote`.
    pub kind: String,
    pub message: String,
    pub attempts: u32,
}

/// Unified result of one lookup.
///
/// Every list field is always present. A field whose sub-dictionary failed
/// or was not queried stays empty, and `complete` tells the two situations
/// apart from a genuinely empty answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRecord {
    /// Normalized search term.
    pub term: String,
    pub headword: Option<String>,
    pub origin_language: Option<String>,
    pub plural: bool,
    pub proper_noun: bool,
    pub senses: Vec<Sense>,
    pub compounds: Vec<String>,
    pub proverbs: Vec<Phrase>,
    pub idioms: Vec<Phrase>,
    pub compiled: Vec<JsonValue>,
    pub terminology: Vec<JsonValue>,
    pub foreign: Vec<JsonValue>,
    pub guide: Vec<JsonValue>,
    pub etymology: Vec<JsonValue>,
    pub pronunciation: Option<Pronunciation>,
    /// Number of primary-dictionary entries returned.
    pub entry_count: usize,
    pub dictionaries_queried: Vec<SubDictionary>,
    pub failed: Vec<FailedSource>,
    pub complete: bool,
    pub elapsed_ms: u64,
    pub fetched_at: DateTime<Utc>,
}

impl AggregatedRecord {
    /// An empty record for `term`: nothing found, nothing failed.
    pub fn empty(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            headword: None,
            origin_language: None,
            plural: false,
            proper_noun: false,
            senses: Vec::new(),
            compounds: Vec::new(),
            proverbs: Vec::new(),
            idioms: Vec::new(),
            compiled: Vec::new(),
            terminology: Vec::new(),
            foreign: Vec::new(),
            guide: Vec::new(),
            etymology: Vec::new(),
            pronunciation: None,
            entry_count: 0,
            dictionaries_queried: Vec::new(),
            failed: Vec::new(),
            complete: true,
            elapsed_ms: 0,
            fetched_at: Utc::now(),
        }
    }

    /// True when the primary dictionary knows the term.
    pub fn is_found(&self) -> bool {
        self.entry_count > 0
    }

    /// Equality ignoring timing fields.
    pub fn same_content(&self, other: &Self) -> bool {
        let mut a = self.clone();
        let mut b = other.clone();
        a.elapsed_ms = 0;
        b.elapsed_ms = 0;
        b.fetched_at = a.fetched_at;
        a == b
    }
}
