//! Result shapes of the derived operations.

use merge::Phrase;
use serde::{Deserialize, Serialize};

/// Spelling verdict for one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCheckEntry {
    pub term: String,
    pub is_correct: bool,
    /// Empty for correct words.
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverbsResult {
    pub term: String,
    pub proverbs: Vec<Phrase>,
    pub idioms: Vec<Phrase>,
    /// False when the proverb sub-dictionary could not be reached.
    pub complete: bool,
}

/// One page of terms starting with a letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterPage {
    pub letter: String,
    pub page: usize,
    pub page_size: usize,
    /// Matching terms across all pages.
    pub total: usize,
    pub terms: Vec<String>,
}
