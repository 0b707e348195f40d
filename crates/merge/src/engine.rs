//! Combines settled fan-out outcomes into an [`AggregatedRecord`].

use std::time::Duration;

use chrono::Utc;
use fetch::{LookupKey, SourceOutcome, SubDictionary};
use tracing::debug;

use crate::extract;
use crate::record::{AggregatedRecord, FailedSource};

/// Maps per-source payloads onto record fields.
#[derive(Debug, Clone)]
pub struct MergeEngine {
    audio_base: String,
}

impl MergeEngine {
    /// `audio_base` prefixes pronunciation audio URLs.
    pub fn new(audio_base: impl Into<String>) -> Self {
        Self {
            audio_base: audio_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the record for `key` from its outcomes.
    ///
    /// Failed legs leave their fields empty and are listed in `failed`.
    /// `complete` holds only when every requested source has a successful
    /// outcome.
    pub fn merge(
        &self,
        key: &LookupKey,
        outcomes: &[SourceOutcome],
        elapsed: Duration,
    ) -> AggregatedRecord {
        let mut record = AggregatedRecord::empty(key.term());
        record.dictionaries_queried = key.sources().to_vec();
        record.elapsed_ms = elapsed.as_millis().min(u128::from(u64::MAX)) as u64;
        record.fetched_at = Utc::now();

        let mut phrase_items = Vec::new();
        let mut side_list = Vec::new();

        for outcome in outcomes {
            let items = match &outcome.result {
                Ok(items) => items.as_slice(),
                Err(err) => {
                    record.failed.push(FailedSource {
                        source: outcome.source,
                        kind: err.kind().to_string(),
                        message: err.to_string(),
                        attempts: outcome.attempts,
                    });
                    continue;
                }
            };

            match outcome.source {
                SubDictionary::Gts => {
                    let fields = extract::primary(items);
                    record.entry_count = items.len();
                    record.headword = fields.headword;
                    record.origin_language = fields.origin_language;
                    record.plural = fields.plural;
                    record.proper_noun = fields.proper_noun;
                    record.senses = fields.senses;
                    record.compounds = fields.compounds;
                    side_list = fields.phrases;
                }
                SubDictionary::Atasozu => phrase_items.extend(items.iter().cloned()),
                SubDictionary::Derleme => record.compiled = items.to_vec(),
                SubDictionary::Terim => record.terminology = items.to_vec(),
                SubDictionary::Bati => record.foreign = items.to_vec(),
                SubDictionary::Kilavuz => record.guide = items.to_vec(),
                SubDictionary::Etms => record.etymology = items.to_vec(),
                SubDictionary::Yazim => {
                    record.pronunciation = extract::pronunciation(items, &self.audio_base);
                }
            }
        }

        // Typed proverb-leg items win over the untyped side-list copies.
        phrase_items.extend(side_list);
        let (proverbs, idioms) = extract::phrases(phrase_items.iter());
        record.proverbs = proverbs;
        record.idioms = idioms;

        let settled_all = key
            .sources()
            .iter()
            .all(|source| outcomes.iter().any(|o| o.source == *source));
        record.complete = settled_all && record.failed.is_empty();

        debug!(
            term = %record.term,
            senses = record.senses.len(),
            failed = record.failed.len(),
            complete = record.complete,
            "merged"
        );
        record
    }
}
