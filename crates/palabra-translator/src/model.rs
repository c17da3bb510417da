use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of a single dictionary lookup.
///
/// ```text
/// Translation
///     ├ word, from_lang, to_lang, url
///     └ translations []        sections, e.g. "Principal Translations"
///         ├ title
///         └ entries []
///             ├ context
///             ├ from_word {source, grammar}
///             ├ to_word [] {meaning, notes, grammar}
///             ├ from_example
///             └ to_example []
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub word: String,
    pub from_lang: String,
    pub to_lang: String,
    pub url: String,
    pub translations: Vec<Section>,
}

impl Translation {
    /// All entries across sections, in display order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.translations.iter().flat_map(|s| s.entries.iter())
    }

    /// Entry by 1-based position across all sections
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        index.checked_sub(1).and_then(|i| self.entries().nth(i))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub context: String,
    pub from_word: FromWord,
    pub to_word: Vec<ToWord>,
    pub from_example: String,
    pub to_example: Vec<String>,
}

impl Entry {
    /// Meanings joined one per line, in plain text
    pub fn meanings(&self) -> String {
        self.to_word
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FromWord {
    pub source: String,
    pub grammar: String,
}

impl fmt::Display for FromWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.grammar.is_empty() {
            write!(f, "{}", self.source)
        } else {
            write!(f, "{} ({})", self.source, self.grammar)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToWord {
    pub meaning: String,
    /// Clarification about the meaning
    pub notes: String,
    pub grammar: String,
}

impl fmt::Display for ToWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.meaning)?;
        if !self.grammar.is_empty() {
            write!(f, " ({})", self.grammar)?;
        }
        if !self.notes.is_empty() {
            write!(f, " ({})", self.notes)?;
        }
        Ok(())
    }
}
