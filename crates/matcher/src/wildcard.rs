//! Wildcard patterns: `?` is one character, `*` is any run of characters,
//! and an optional trailing `,N` pins the match length to exactly N.

use normalize::fold_case;
use regex::Regex;

use crate::error::PatternError;
use crate::pool::CandidatePool;

/// A compiled wildcard pattern, reusable across any number of candidates.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
    length: Option<usize>,
}

impl WildcardPattern {
    /// Validates and compiles `pattern`. Matching is case-insensitive with
    /// Turkish folding on both sides.
    pub fn compile(pattern: &str, max_len: usize) -> Result<Self, PatternError> {
        let trimmed = pattern.trim();
        let (body, length) = match trimmed.rsplit_once(',') {
            Some((body, clause)) => {
                let n = clause
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| PatternError::InvalidLength(clause.to_string()))?;
                (body.trim(), Some(n))
            }
            None => (trimmed, None),
        };

        let body = fold_case(body);
        if body.is_empty() {
            return Err(PatternError::Empty);
        }
        let len = body.chars().count();
        if len > max_len {
            return Err(PatternError::TooLong { len, max: max_len });
        }

        let mut expr = String::with_capacity(body.len() + 8);
        expr.push('^');
        for ch in body.chars() {
            match ch {
                '?' => expr.push('.'),
                '*' => expr.push_str(".*"),
                other => expr.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
            }
        }
        expr.push('$');

        Ok(Self {
            source: trimmed.to_string(),
            regex: Regex::new(&expr)?,
            length,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Required character count, when the pattern carries a `,N` clause.
    pub fn length(&self) -> Option<usize> {
        self.length
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        let folded = fold_case(candidate);
        if let Some(n) = self.length {
            if folded.chars().count() != n {
                return false;
            }
        }
        self.regex.is_match(&folded)
    }

    /// Matching pool terms in pool order, at most `limit`.
    pub fn filter(&self, pool: &CandidatePool, limit: usize) -> Vec<String> {
        pool.iter()
            .filter(|term| self.is_match(term))
            .take(limit)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str) -> WildcardPattern {
        WildcardPattern::compile(pattern, 64).unwrap()
    }

    #[test]
    fn question_mark_is_exactly_one_char() {
        let p = compile("k?tap");
        assert!(p.is_match("kitap"));
        assert!(p.is_match("katap"));
        assert!(!p.is_match("kiitap"));
        assert!(!p.is_match("ktap"));
    }

    #[test]
    fn star_with_length_clause() {
        let p = compile("k*p,5");
        assert_eq!(p.length(), Some(5));
        assert!(p.is_match("kitap"));
        assert!(p.is_match("kalıp"));
        assert!(!p.is_match("kap"));
        assert!(!p.is_match("kırbaçp"));
        assert!(!p.is_match("kitab"));
    }

    #[test]
    fn star_matches_empty_run() {
        let p = compile("ka*");
        assert!(p.is_match("ka"));
        assert!(p.is_match("kalem"));
        assert!(!p.is_match("akal"));
    }

    #[test]
    fn matching_folds_turkish_case() {
        let p = compile("IŞ?K");
        assert!(p.is_match("ışık"));
        assert!(!p.is_match("işik"));
        assert!(compile("İ*").is_match("ince"));
        assert!(compile("ç?ğ").is_match("ÇAĞ"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let p = compile("a.b");
        assert!(p.is_match("a.b"));
        assert!(!p.is_match("axb"));
    }

    #[test]
    fn compiled_pattern_is_reusable() {
        let p = compile("?a*");
        let pool = CandidatePool::from_raw(["kalem", "masa", "elma", "para", "kitap"]);
        assert_eq!(p.filter(&pool, 10), ["kalem", "masa", "para"]);
        assert_eq!(p.filter(&pool, 2), ["kalem", "masa"]);
    }

    #[test]
    fn rejects_bad_patterns() {
        assert!(matches!(WildcardPattern::compile("", 64), Err(PatternError::Empty)));
        assert!(matches!(WildcardPattern::compile(",5", 64), Err(PatternError::Empty)));
        assert!(matches!(
            WildcardPattern::compile("k*p,x", 64),
            Err(PatternError::InvalidLength(_))
        ));
        assert!(matches!(
            WildcardPattern::compile("k*p,0", 64),
            Err(PatternError::InvalidLength(_))
        ));
        assert!(matches!(
            WildcardPattern::compile("kalemlik", 4),
            Err(PatternError::TooLong { len: 8, max: 4 })
        ));
    }
}
