//! Resilient aggregation over the Turkish Language Association dictionary
//! service.
//!
//! One lookup fans out to every requested sub-dictionary at once, retries
//! each leg on its own, tolerates partial failure and merges the answers into
//! one [`AggregatedRecord`]. Spelling suggestions, similar words, per-letter
//! listings and wildcard search run over a cached candidate pool.
//!
//! The stages live in their own crates and are re-exported here:
//!
//! | Stage      | Crate       |
//! |------------|-------------|
//! | normalize  | [`normalize`] |
//! | fetch      | [`fetch`]     |
//! | cache      | [`cache`]     |
//! | merge      | [`merge`]     |
//! | matching   | [`matcher`]   |
//!
//! ```no_run
//! use sozluk::{Dictionary, LookupOptions, SozlukConfig};
//!
//! # async fn run() -> Result<(), sozluk::DictionaryError> {
//! let dictionary = Dictionary::new(&SozlukConfig::default())?;
//! let record = dictionary.lookup("Kalem", &LookupOptions::default()).await?;
//! println!("{} senses, complete: {}", record.senses.len(), record.complete);
//! # Ok(())
//! # }
//! ```

pub mod config;
mod dictionary;
mod error;
mod types;

pub use crate::config::{CacheSettings, ConfigLoadError, SozlukConfig};
pub use crate::dictionary::Dictionary;
pub use crate::error::DictionaryError;
pub use crate::types::{LetterPage, ProverbsResult, SpellCheckEntry};

pub use cache::{CacheConfig, CacheStats, Invalidation, TtlCache};
pub use fetch::{
    FetchError, HttpTransport, LookupKey, LookupOptions, RetryConfig, SourceOutcome,
    SourceQuery, SubDictionary, Transport, TransportConfig, TransportResponse,
};
pub use matcher::{CandidatePool, MatchingConfig, PatternError, SuggestionCandidate, WildcardPattern};
pub use merge::{AggregatedRecord, Category, Example, FailedSource, Phrase, Pronunciation, Sense};
pub use normalize::{fold_case, normalize_term, NormalizeError};
