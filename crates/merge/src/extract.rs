//! Per-source extraction rules.
//!
//! Every extractor is total: unknown shapes and missing fields produce empty
//! or `None` values, never errors. A successful leg always contributes
//! whatever it can.

use std::collections::HashSet;

use normalize::fold_case;
use serde_json::Value as JsonValue;

use crate::category::Category;
use crate::record::{Example, Phrase, Pronunciation, Sense};

const COMPOUND_DELIMITER: char = ',';
const IDIOM_MARKER: &str = "deyim";

/// Fields taken from the primary dictionary.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct PrimaryFields {
    pub headword: Option<String>,
    pub origin_language: Option<String>,
    pub plural: bool,
    pub proper_noun: bool,
    pub senses: Vec<Sense>,
    pub compounds: Vec<String>,
    pub phrases: Vec<JsonValue>,
}

/// Non-empty trimmed text of `key`; numbers are rendered as text.
fn text(item: &JsonValue, key: &str) -> Option<String> {
    match item.get(key)? {
        JsonValue::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The service writes booleans as `"1"`/`"0"`.
fn flag(item: &JsonValue, key: &str) -> bool {
    match item.get(key) {
        Some(JsonValue::String(s)) => s.trim() == "1",
        Some(JsonValue::Number(n)) => n.as_u64() == Some(1),
        Some(JsonValue::Bool(b)) => *b,
        _ => false,
    }
}

fn list<'a>(item: &'a JsonValue, key: &str) -> &'a [JsonValue] {
    item.get(key)
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub(crate) fn split_compounds(raw: &str) -> Vec<String> {
    raw.split(COMPOUND_DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn example(item: &JsonValue) -> Option<Example> {
    let text = text(item, "ornek")?;
    let author = list(item, "yazar")
        .first()
        .and_then(|author| self::text(author, "tam_adi"));
    Some(Example { text, author })
}

fn sense(item: &JsonValue, fallback_number: u32) -> Option<Sense> {
    let text = text(item, "anlam")?;
    let number = text_u32(item, "anlam_sira").unwrap_or(fallback_number);
    let markers = list(item, "ozelliklerListe")
        .iter()
        .filter_map(|p| p.get("tam_adi").and_then(JsonValue::as_str));
    let category = Category::from_markers(markers, flag(item, "fiil"));
    let examples = list(item, "orneklerListe").iter().filter_map(example).collect();

    Some(Sense {
        number,
        text,
        category,
        examples,
    })
}

fn text_u32(item: &JsonValue, key: &str) -> Option<u32> {
    text(item, key)?.parse().ok()
}

/// Headword and flags come from the first entry; senses, compounds and the
/// proverb side-list are gathered from every entry in order.
pub(crate) fn primary(items: &[JsonValue]) -> PrimaryFields {
    let Some(first) = items.first() else {
        return PrimaryFields::default();
    };

    let mut fields = PrimaryFields {
        headword: text(first, "madde"),
        origin_language: text(first, "lisan"),
        plural: flag(first, "cogul_mu"),
        proper_noun: flag(first, "ozel_mi"),
        ..PrimaryFields::default()
    };

    for item in items {
        for raw in list(item, "anlamlarListe") {
            let fallback = fields.senses.len() as u32 + 1;
            if let Some(sense) = sense(raw, fallback) {
                fields.senses.push(sense);
            }
        }
        if let Some(raw) = item.get("birlesikler").and_then(JsonValue::as_str) {
            for compound in split_compounds(raw) {
                if !fields.compounds.contains(&compound) {
                    fields.compounds.push(compound);
                }
            }
        }
        fields.phrases.extend(list(item, "atasozu").iter().cloned());
    }

    fields
}

/// Splits phrase items into `(proverbs, idioms)`, dropping duplicates.
pub(crate) fn phrases<'a, I>(items: I) -> (Vec<Phrase>, Vec<Phrase>)
where
    I: IntoIterator<Item = &'a JsonValue>,
{
    let mut proverbs = Vec::new();
    let mut idioms = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for item in items {
        let Some(text) = text(item, "sozum").or_else(|| text(item, "madde")) else {
            continue;
        };
        if !seen.insert(fold_case(&text)) {
            continue;
        }

        let phrase = Phrase {
            text,
            meaning: self::text(item, "anlami"),
        };
        let is_idiom = self::text(item, "turu2")
            .map(|kind| fold_case(&kind).contains(IDIOM_MARKER))
            .unwrap_or(false);
        if is_idiom {
            idioms.push(phrase);
        } else {
            proverbs.push(phrase);
        }
    }

    (proverbs, idioms)
}

/// Audio reference from the first spelling entry that carries one.
pub(crate) fn pronunciation(items: &[JsonValue], base_url: &str) -> Option<Pronunciation> {
    let code = items.first().and_then(|item| text(item, "seskod"))?;
    let audio_url = format!("{}/ses/{}.wav", base_url.trim_end_matches('/'), code);
    Some(Pronunciation { code, audio_url })
}
