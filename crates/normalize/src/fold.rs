//! Turkish case folding.
//!
//! The default Unicode lowercase mapping gets the dotted/dotless I pair wrong
//! for Turkish: `I` must become `ı` and `İ` must become a plain `i` (not `i`
//! followed by a combining dot).

/// Lower-cases a single character with Turkish rules, pushing the result into `out`.
#[inline]
pub(crate) fn push_folded(ch: char, out: &mut String) {
    match ch {
        'I' => out.push('ı'),
        'İ' => out.push('i'),
        _ => out.extend(ch.to_lowercase()),
    }
}

/// Lower-cases `text` using Turkish casing rules.
///
/// This does no filtering or whitespace handling; use
/// [`normalize_term`](crate::normalize_term) for lookup keys.
pub fn fold_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_folded(ch, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_and_dotless_pairs() {
        assert_eq!(fold_case("İSTANBUL"), "istanbul");
        assert_eq!(fold_case("IŞIK"), "ışık");
        assert_eq!(fold_case("ıi"), "ıi");
    }

    #[test]
    fn turkish_uppercase_letters() {
        assert_eq!(fold_case("ÇĞÖŞÜ"), "çğöşü");
    }

    #[test]
    fn leaves_non_letters_alone() {
        assert_eq!(fold_case("k?t*p,5"), "k?t*p,5");
    }
}
