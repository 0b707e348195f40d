//! Sub-dictionary catalogue, lookup keys and per-source queries.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use normalize::{try_normalize, NormalizeError};
use serde::{Deserialize, Serialize};

/// One independently queried dataset of the remote dictionary service.
///
/// The declaration order is the canonical leg order: fan-outs are issued and
/// merged in this order no matter how the caller listed the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubDictionary {
    /// General definitions (primary dictionary).
    Gts,
    /// Proverbs and idioms.
    Atasozu,
    /// Compiled dialect corpus.
    Derleme,
    /// Terminology.
    Terim,
    /// Foreign-origin word glossary.
    Bati,
    /// Spelling guide.
    Kilavuz,
    /// Etymology.
    Etms,
    /// Spelling/pronunciation entry; only queried when pronunciation is requested.
    Yazim,
}

impl SubDictionary {
    /// The sub-dictionaries a lookup queries when the caller names none.
    pub const STANDARD: [SubDictionary; 7] = [
        SubDictionary::Gts,
        SubDictionary::Atasozu,
        SubDictionary::Derleme,
        SubDictionary::Terim,
        SubDictionary::Bati,
        SubDictionary::Kilavuz,
        SubDictionary::Etms,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SubDictionary::Gts => "gts",
            SubDictionary::Atasozu => "atasozu",
            SubDictionary::Derleme => "derleme",
            SubDictionary::Terim => "terim",
            SubDictionary::Bati => "bati",
            SubDictionary::Kilavuz => "kilavuz",
            SubDictionary::Etms => "etms",
            SubDictionary::Yazim => "yazim",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            SubDictionary::Gts => "/gts",
            SubDictionary::Atasozu => "/atasozu",
            SubDictionary::Derleme => "/derleme",
            SubDictionary::Terim => "/terim",
            SubDictionary::Bati => "/bati",
            SubDictionary::Kilavuz => "/kilavuz",
            SubDictionary::Etms => "/etms",
            SubDictionary::Yazim => "/yazim",
        }
    }

    /// Endpoint query parameters for `term`.
    pub fn params(&self, term: &str) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(2);
        match self {
            SubDictionary::Terim => params.push(("eser_ad".to_string(), "tümü".to_string())),
            SubDictionary::Kilavuz => params.push(("prm".to_string(), "ysk".to_string())),
            _ => {}
        }
        params.push(("ara".to_string(), term.to_string()));
        params
    }
}

impl fmt::Display for SubDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unknown sub-dictionary name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sub-dictionary: {0}")]
pub struct UnknownSubDictionary(pub String);

impl FromStr for SubDictionary {
    type Err = UnknownSubDictionary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gts" => Ok(SubDictionary::Gts),
            "atasozu" => Ok(SubDictionary::Atasozu),
            "derleme" => Ok(SubDictionary::Derleme),
            "terim" => Ok(SubDictionary::Terim),
            "bati" => Ok(SubDictionary::Bati),
            "kilavuz" => Ok(SubDictionary::Kilavuz),
            "etms" => Ok(SubDictionary::Etms),
            "yazim" => Ok(SubDictionary::Yazim),
            other => Err(UnknownSubDictionary(other.to_string())),
        }
    }
}

/// Caller-facing lookup options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupOptions {
    /// Sub-dictionaries to query; empty means [`SubDictionary::STANDARD`].
    #[serde(default)]
    pub sources: Vec<SubDictionary>,
    /// Also query the pronunciation leg.
    #[serde(default)]
    pub include_pronunciation: bool,
    /// Overrides the configured cache TTL for this lookup. Not part of the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_ttl: Option<Duration>,
}

impl LookupOptions {
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = SubDictionary>) -> Self {
        self.sources = sources.into_iter().collect();
        self
    }

    pub fn with_pronunciation(mut self, include: bool) -> Self {
        self.include_pronunciation = include;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }
}

/// Prefix shared by every cached lookup.
pub const LOOKUP_KEY_PREFIX: &str = "lookup:";

/// Normalized term plus the options that change the result.
///
/// Two requests with equal keys are cache-equivalent: sources are de-duplicated
/// and sorted into catalogue order, and the pronunciation leg is folded in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    term: String,
    sources: Vec<SubDictionary>,
    include_pronunciation: bool,
}

impl LookupKey {
    /// Normalizes `raw` and resolves `options` into a key.
    pub fn new(raw: &str, options: &LookupOptions) -> Result<Self, NormalizeError> {
        let term = try_normalize(raw)?;
        let mut sources: Vec<SubDictionary> = if options.sources.is_empty() {
            SubDictionary::STANDARD.to_vec()
        } else {
            options
                .sources
                .iter()
                .copied()
                .filter(|s| *s != SubDictionary::Yazim)
                .collect()
        };
        if options.include_pronunciation {
            sources.push(SubDictionary::Yazim);
        }
        sources.sort();
        sources.dedup();

        Ok(Self {
            term,
            sources,
            include_pronunciation: options.include_pronunciation,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Every leg this key fans out to, pronunciation included.
    pub fn sources(&self) -> &[SubDictionary] {
        &self.sources
    }

    pub fn include_pronunciation(&self) -> bool {
        self.include_pronunciation
    }

    /// Stable cache key: `lookup:<term>|<source,...>|p<0|1>`.
    pub fn cache_key(&self) -> String {
        let names: Vec<&str> = self.sources.iter().map(SubDictionary::name).collect();
        format!(
            "{LOOKUP_KEY_PREFIX}{}|{}|p{}",
            self.term,
            names.join(","),
            u8::from(self.include_pronunciation)
        )
    }

    /// Prefix matching every cached variant of `term` (already normalized).
    pub fn term_prefix(term: &str) -> String {
        format!("{LOOKUP_KEY_PREFIX}{term}|")
    }

    /// One query per leg, in catalogue order.
    pub fn queries(&self) -> Vec<SourceQuery> {
        self.sources
            .iter()
            .map(|source| SourceQuery::new(*source, &self.term))
            .collect()
    }
}

/// One sub-dictionary request derived from a [`LookupKey`]. Immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    source: SubDictionary,
    params: Vec<(String, String)>,
}

impl SourceQuery {
    pub fn new(source: SubDictionary, term: &str) -> Self {
        Self {
            source,
            params: source.params(term),
        }
    }

    pub fn source(&self) -> SubDictionary {
        self.source
    }

    pub fn path(&self) -> &'static str {
        self.source.path()
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}
