//! Merge engine: turns settled per-sub-dictionary outcomes into one
//! [`AggregatedRecord`].
//!
//! Merging never fails. A failed leg only leaves its fields at their
//! defaults and shows up in [`AggregatedRecord::failed`].

mod category;
mod engine;
mod extract;
mod record;

pub use crate::category::Category;
pub use crate::engine::MergeEngine;
pub use crate::record::{
    AggregatedRecord, Example, FailedSource, Phrase, Pronunciation, Sense,
};
