use normalize::fold_case;
use serde::{Deserialize, Serialize};

/// Grammatical category of a sense.
///
/// Declaration order is match priority: when a sense carries several
/// markers, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Noun,
    Adjective,
    Adverb,
    Verb,
    Preposition,
    Conjunction,
    Interjection,
}

impl Category {
    pub const PRIORITY: [Category; 7] = [
        Category::Noun,
        Category::Adjective,
        Category::Adverb,
        Category::Verb,
        Category::Preposition,
        Category::Conjunction,
        Category::Interjection,
    ];

    /// Marker used by the primary dictionary's property list.
    pub fn marker(&self) -> &'static str {
        match self {
            Category::Noun => "isim",
            Category::Adjective => "sıfat",
            Category::Adverb => "zarf",
            Category::Verb => "fiil",
            Category::Preposition => "edat",
            Category::Conjunction => "bağlaç",
            Category::Interjection => "ünlem",
        }
    }

    /// First category, in priority order, whose marker appears in `markers`.
    pub fn from_markers<'a, I>(markers: I, verb_flag: bool) -> Option<Category>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let folded: Vec<String> = markers
            .into_iter()
            .map(|m| fold_case(m.trim()))
            .collect();

        Self::PRIORITY.into_iter().find(|category| {
            (*category == Category::Verb && verb_flag)
                || folded.iter().any(|m| m == category.marker())
        })
    }
}
