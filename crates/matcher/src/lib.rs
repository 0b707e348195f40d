//! Approximate matching over candidate pools.
//!
//! - [`spelling_suggestions`]: corrections for a term the primary dictionary
//!   does not know.
//! - [`similar_words`]: same-initial terms sharing a prefix or middle substring.
//! - [`WildcardPattern`]: `?`/`*` patterns with an optional `,N` length clause.
//!
//! All operations are pure functions of their input and a [`CandidatePool`].
//! An empty pool yields an empty result, never an error.

mod config;
mod error;
mod pool;
mod suggest;
mod wildcard;

pub use crate::config::MatchingConfig;
pub use crate::error::PatternError;
pub use crate::pool::CandidatePool;
pub use crate::suggest::{
    similar_words, spelling_suggestions, SuggestionCandidate, MIDDLE_SCORE, PREFIX_SCORE,
};
pub use crate::wildcard::WildcardPattern;
