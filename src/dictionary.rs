//! The dictionary service: cached, coalesced lookups and the operations
//! derived from them.

use std::sync::Arc;
use std::time::{Duration, Instant};

use cache::{CacheStats, Invalidation, TtlCache};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use fetch::{
    Dispatcher, FetchError, HttpTransport, LookupKey, LookupOptions, SubDictionary, Transport,
};
use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use matcher::{CandidatePool, MatchingConfig, WildcardPattern};
use merge::{AggregatedRecord, MergeEngine};
use normalize::normalize_term;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::config::{CacheSettings, SozlukConfig};
use crate::error::DictionaryError;
use crate::types::{LetterPage, ProverbsResult, SpellCheckEntry};

const DAILY_WORD_KEY: &str = "daily:word";
const POOL_KEY: &str = "pool:autocomplete";
const DAILY_PATH: &str = "/icerik";
const AUTOCOMPLETE_PATH: &str = "/autocomplete.json";

/// Everything the cache holds. Values are shared, never mutated.
#[derive(Debug, Clone)]
enum Cached {
    Record(Arc<AggregatedRecord>),
    Pool(Arc<CandidatePool>),
    DailyWord(JsonValue),
}

type InFlight = Shared<BoxFuture<'static, Arc<AggregatedRecord>>>;

struct Inner {
    dispatcher: Dispatcher,
    merger: MergeEngine,
    cache: Arc<TtlCache<Cached>>,
    ttls: CacheSettings,
    matching: MatchingConfig,
    coalesce: bool,
    in_flight: DashMap<String, InFlight>,
}

/// Aggregating dictionary client.
///
/// Cloning is cheap and clones share the cache and the in-flight table.
#[derive(Clone)]
pub struct Dictionary {
    inner: Arc<Inner>,
}

impl Dictionary {
    /// Builds a client backed by [`HttpTransport`].
    pub fn new(config: &SozlukConfig) -> Result<Self, DictionaryError> {
        let transport = HttpTransport::new(&config.transport).map_err(DictionaryError::Transport)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Builds a client over any [`Transport`].
    pub fn with_transport(config: &SozlukConfig, transport: Arc<dyn Transport>) -> Self {
        let merger = MergeEngine::new(transport.base_url());
        let dispatcher = Dispatcher::new(transport, config.retry, config.transport.timeout);
        Self {
            inner: Arc::new(Inner {
                dispatcher,
                merger,
                cache: Arc::new(TtlCache::new(&config.cache.store_config())),
                ttls: config.cache.clone(),
                matching: config.matching.clone(),
                coalesce: config.coalesce_requests,
                in_flight: DashMap::new(),
            }),
        }
    }

    /// Starts the periodic expiry sweep when one is configured.
    ///
    /// Must be called from inside a Tokio runtime. The task ends once every
    /// clone of this client is dropped.
    pub fn start_sweeper(&self) -> Option<tokio::task::JoinHandle<()>> {
        let interval = self.inner.ttls.store_config().sweep_interval()?;
        if !self.inner.cache.is_enabled() {
            return None;
        }
        Some(self.inner.cache.spawn_sweeper(interval))
    }

    /// Aggregated record for `term`.
    ///
    /// Fails only on invalid input. Sub-dictionary failures yield a record
    /// with `complete == false`. Only complete records are cached.
    pub async fn lookup(
        &self,
        term: &str,
        options: &LookupOptions,
    ) -> Result<Arc<AggregatedRecord>, DictionaryError> {
        let key = LookupKey::new(term, options)?;
        let cache_key = key.cache_key();

        if let Some(Cached::Record(record)) = self.inner.cache.get(&cache_key) {
            debug!(key = %cache_key, "lookup_cache_hit");
            return Ok(record);
        }

        let ttl = options.cache_ttl.unwrap_or_else(|| self.inner.ttls.lookup_ttl());
        if !self.inner.coalesce {
            return Ok(self.inner.fetch_and_store(key, ttl).await);
        }

        let pending = match self.inner.in_flight.entry(cache_key.clone()) {
            Entry::Occupied(slot) => {
                debug!(key = %cache_key, "lookup_coalesced");
                slot.get().clone()
            }
            Entry::Vacant(slot) => {
                let inner = Arc::clone(&self.inner);
                let fut = async move { inner.fetch_and_store(key, ttl).await }
                    .boxed()
                    .shared();
                slot.insert(fut.clone());
                fut
            }
        };

        let _registration = InFlightGuard {
            table: &self.inner.in_flight,
            key: cache_key,
            pending: pending.clone(),
        };
        Ok(pending.await)
    }

    /// Checks every distinct word of `text` against the primary dictionary.
    pub async fn spell_check(&self, text: &str) -> Result<Vec<SpellCheckEntry>, DictionaryError> {
        let normalized = normalize_term(text);
        if normalized.is_empty() {
            return Err(DictionaryError::Validation(
                "text is empty after normalization".to_string(),
            ));
        }

        let mut words: Vec<&str> = Vec::new();
        for word in normalized.split_whitespace() {
            if !words.contains(&word) {
                words.push(word);
            }
        }

        let options = LookupOptions::default().with_sources([SubDictionary::Gts]);
        let lookups = join_all(words.iter().map(|word| self.lookup(word, &options))).await;

        let mut pool: Option<Arc<CandidatePool>> = None;
        let mut entries = Vec::with_capacity(words.len());
        for (word, record) in words.into_iter().zip(lookups) {
            let is_correct = record?.is_found();
            let suggestions = if is_correct {
                Vec::new()
            } else {
                let pool = match &pool {
                    Some(pool) => Arc::clone(pool),
                    None => {
                        let fetched = self.candidate_pool().await;
                        pool = Some(Arc::clone(&fetched));
                        fetched
                    }
                };
                matcher::spelling_suggestions(word, &pool, self.inner.matching.suggestion_count)
                    .into_iter()
                    .map(|candidate| candidate.term)
                    .collect()
            };
            entries.push(SpellCheckEntry {
                term: word.to_string(),
                is_correct,
                suggestions,
            });
        }

        Ok(entries)
    }

    /// Proverbs and idioms for `term`, from the proverb sub-dictionary only.
    pub async fn find_proverbs(&self, term: &str) -> Result<ProverbsResult, DictionaryError> {
        let options = LookupOptions::default().with_sources([SubDictionary::Atasozu]);
        let record = self.lookup(term, &options).await?;
        Ok(ProverbsResult {
            term: record.term.clone(),
            proverbs: record.proverbs.clone(),
            idioms: record.idioms.clone(),
            complete: record.complete,
        })
    }

    /// Pool terms resembling `term`, at most `limit`.
    ///
    /// `limit` must lie in `1..=matching.max_similar`.
    pub async fn similar_words(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<String>, DictionaryError> {
        let normalized = normalize::try_normalize(term)?;
        let max = self.inner.matching.max_similar;
        if limit == 0 || limit > max {
            return Err(DictionaryError::Validation(format!(
                "limit must be between 1 and {max}, got {limit}"
            )));
        }
        let pool = self.candidate_pool().await;
        Ok(matcher::similar_words(&normalized, &pool, limit))
    }

    /// One page of pool terms starting with `letter` (case-folded).
    pub async fn words_by_letter(
        &self,
        letter: &str,
        page: usize,
        page_size: usize,
    ) -> Result<LetterPage, DictionaryError> {
        let mut chars = letter.trim().chars();
        let ch = match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => {
                return Err(DictionaryError::Validation(format!(
                    "expected a single character, got `{letter}`"
                )))
            }
        };
        if page == 0 || page_size == 0 {
            return Err(DictionaryError::Validation(
                "page and page_size must be >= 1".to_string(),
            ));
        }

        let pool = self.candidate_pool().await;
        let matching: Vec<&str> = pool.starting_with(ch).collect();
        let offset = (page - 1).saturating_mul(page_size);
        let terms = matching
            .iter()
            .skip(offset)
            .take(page_size)
            .map(|t| t.to_string())
            .collect();

        Ok(LetterPage {
            letter: normalize::fold_case(&ch.to_string()),
            page,
            page_size,
            total: matching.len(),
            terms,
        })
    }

    /// Pool terms matching a wildcard pattern, capped by configuration.
    pub async fn wildcard_search(&self, pattern: &str) -> Result<Vec<String>, DictionaryError> {
        let compiled = WildcardPattern::compile(pattern, self.inner.matching.max_pattern_len)?;
        let pool = self.candidate_pool().await;
        let found = compiled.filter(&pool, self.inner.matching.max_wildcard_results);
        debug!(pattern = compiled.as_str(), matches = found.len(), "wildcard_search");
        Ok(found)
    }

    /// The service's word of the day.
    pub async fn daily_word(&self) -> Result<JsonValue, DictionaryError> {
        if let Some(Cached::DailyWord(word)) = self.inner.cache.get(DAILY_WORD_KEY) {
            return Ok(word);
        }

        let content = self
            .inner
            .dispatcher
            .fetch_json(DAILY_PATH, &[])
            .await
            .map_err(DictionaryError::Unavailable)?;
        let word = content
            .get("kelime")
            .and_then(JsonValue::as_array)
            .and_then(|words| words.first())
            .cloned()
            .ok_or_else(|| {
                DictionaryError::Unavailable(FetchError::Malformed(
                    "daily content has no `kelime` entry".to_string(),
                ))
            })?;

        self.inner.cache.set(
            DAILY_WORD_KEY,
            Cached::DailyWord(word.clone()),
            self.inner.ttls.daily_word_ttl(),
        );
        Ok(word)
    }

    /// The first `limit` terms of the candidate pool.
    pub async fn popular_terms(&self, limit: usize) -> Vec<String> {
        let pool = self.candidate_pool().await;
        pool.iter().take(limit).map(str::to_string).collect()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.inner.cache.stats()
    }

    /// `None` clears everything, `x*` clears keys starting with `x`, anything
    /// else clears that exact key. Returns how many entries were removed.
    pub fn invalidate_cache(&self, key_or_prefix: Option<&str>) -> usize {
        self.inner
            .cache
            .invalidate(&Invalidation::parse(key_or_prefix))
    }

    /// Removes every cached lookup variant of `term`.
    pub fn invalidate_term(&self, term: &str) -> Result<usize, DictionaryError> {
        let normalized = normalize::try_normalize(term)?;
        let prefix = LookupKey::term_prefix(&normalized);
        Ok(self.inner.cache.invalidate(&Invalidation::Prefix(prefix)))
    }

    /// Drops expired entries now instead of waiting for the sweeper.
    pub fn sweep_cache(&self) -> usize {
        self.inner.cache.sweep()
    }

    /// Candidate universe for the matching operations. A failed fetch
    /// yields an empty pool that is not cached.
    async fn candidate_pool(&self) -> Arc<CandidatePool> {
        if let Some(Cached::Pool(pool)) = self.inner.cache.get(POOL_KEY) {
            return pool;
        }

        match self.inner.dispatcher.fetch_json(AUTOCOMPLETE_PATH, &[]).await {
            Ok(JsonValue::Array(items)) => {
                let pool = Arc::new(CandidatePool::from_raw(
                    items
                        .iter()
                        .filter_map(|item| item.get("madde").and_then(JsonValue::as_str)),
                ));
                info!(terms = pool.len(), "candidate_pool_loaded");
                self.inner.cache.set(
                    POOL_KEY,
                    Cached::Pool(Arc::clone(&pool)),
                    self.inner.ttls.pool_ttl(),
                );
                pool
            }
            Ok(_) => {
                warn!("candidate pool payload is not a list");
                Arc::new(CandidatePool::default())
            }
            Err(err) => {
                warn!(error = %err, "candidate_pool_unavailable");
                Arc::new(CandidatePool::default())
            }
        }
    }
}

/// Unregisters a coalesced lookup once its waiter completes or is dropped.
///
/// Only the entry this waiter joined is removed; a newer fan-out registered
/// under the same key is left alone.
struct InFlightGuard<'a> {
    table: &'a DashMap<String, InFlight>,
    key: String,
    pending: InFlight,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.table
            .remove_if(&self.key, |_, current| current.ptr_eq(&self.pending));
    }
}

impl Inner {
    async fn fetch_and_store(&self, key: LookupKey, ttl: Duration) -> Arc<AggregatedRecord> {
        let start = Instant::now();
        let outcomes = self.dispatcher.fan_out(&key.queries()).await;
        let record = Arc::new(self.merger.merge(&key, &outcomes, start.elapsed()));

        info!(
            term = %record.term,
            complete = record.complete,
            failed = record.failed.len(),
            elapsed_ms = record.elapsed_ms,
            "lookup_complete"
        );

        if record.complete {
            self.cache
                .set(key.cache_key(), Cached::Record(Arc::clone(&record)), ttl);
        }
        record
    }
}
