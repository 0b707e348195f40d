//! Search term normalization.
//!
//! Every dictionary lookup goes through [`normalize_term`] before it touches
//! the cache or the network, so two spellings of the same request share one
//! cache entry.
//!
//! ## What we do
//!
//! - Unicode normalization to NFC
//! - Turkish-aware lower-casing (`İ` → `i`, `I` → `ı`)
//! - Drop everything except word characters, hyphens and whitespace
//! - Collapse whitespace runs and trim the edges
//!
//! ## Pure function guarantee
//!
//! No I/O, no locale lookups. The transform is idempotent:
//! `normalize_term(&normalize_term(x)) == normalize_term(x)`.

mod error;
mod fold;
mod whitespace;

use unicode_normalization::UnicodeNormalization;

pub use crate::error::NormalizeError;
pub use crate::fold::fold_case;
pub use crate::whitespace::collapse_whitespace;

/// Canonicalizes a raw search term into a stable lookup term.
///
/// Empty or fully filtered input yields an empty string; callers that need a
/// usable term should go through [`try_normalize`].
pub fn normalize_term(raw: &str) -> String {
    let composed: String = raw.nfc().collect();

    let mut filtered = String::with_capacity(composed.len());
    for ch in composed.chars() {
        if ch.is_whitespace() {
            filtered.push(' ');
            continue;
        }
        let mut folded = String::new();
        fold::push_folded(ch, &mut folded);
        for lower in folded.chars() {
            if is_term_char(lower) {
                filtered.push(lower);
            }
        }
    }

    let collapsed = collapse_whitespace(&filtered);
    // Dropping characters can leave composable neighbours behind.
    collapsed.nfc().collect()
}

/// Like [`normalize_term`], but rejects input that normalizes to nothing.
pub fn try_normalize(raw: &str) -> Result<String, NormalizeError> {
    let term = normalize_term(raw);
    if term.is_empty() {
        return Err(NormalizeError::EmptyInput);
    }
    Ok(term)
}

/// Word characters (Unicode letters and digits, underscore) and hyphens.
#[inline]
fn is_term_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '-'
}
