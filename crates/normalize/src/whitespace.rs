//! Whitespace normalization.
//!
//! [`collapse_whitespace`] splits on any Unicode whitespace run and joins the
//! segments with single ASCII spaces, so the result never has leading or
//! trailing whitespace.
//!
//! ```rust
//! use normalize::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("  kara   kalem \t"), "kara kalem");
//! ```

/// Collapses repeated whitespace, trims edges, and turns newlines and tabs
/// into single spaces.
///
/// Returns an empty string for empty or whitespace-only input.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
