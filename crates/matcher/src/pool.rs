use std::collections::HashSet;

use normalize::{fold_case, normalize_term};
use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated list of normalized terms.
///
/// Order is significant: every matching operation reports candidates in
/// pool order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePool {
    terms: Vec<String>,
}

impl CandidatePool {
    /// Normalizes every raw term, drops empties and keeps the first copy of
    /// each duplicate.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw = raw.into_iter();
        let mut seen: HashSet<String> = HashSet::with_capacity(raw.size_hint().0);
        let mut terms: Vec<String> = Vec::with_capacity(raw.size_hint().0);
        for term in raw {
            let term = normalize_term(term.as_ref());
            if !term.is_empty() && seen.insert(term.clone()) {
                terms.push(term);
            }
        }
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Terms whose first character folds to the same letter as `letter`.
    pub fn starting_with<'a>(&'a self, letter: char) -> impl Iterator<Item = &'a str> + 'a {
        let wanted = fold_case(&letter.to_string());
        self.iter().filter(move |term| {
            term.chars()
                .next()
                .map(|first| fold_case(&first.to_string()) == wanted)
                .unwrap_or(false)
        })
    }
}

impl FromIterator<String> for CandidatePool {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::from_raw(iter)
    }
}
