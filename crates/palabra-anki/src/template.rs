use palabra_translator::Entry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTemplate {
    pub deck: String,
    pub model: String,
    pub front_template: String,
    pub back_template: String,
}

impl CardTemplate {
    /// Word on the front, meanings and examples on the back
    pub fn vocabulary(deck: String, model: String) -> Self {
        Self {
            deck,
            model,
            front_template: "{source}\n{from_example}".to_string(),
            back_template: "{meanings}\n{to_example}".to_string(),
        }
    }

    /// Create custom template
    pub fn new(deck: String, model: String, front: String, back: String) -> Self {
        Self {
            deck,
            model,
            front_template: front,
            back_template: back,
        }
    }

    /// Format the front of the card
    pub fn format_front(&self, entry: &Entry) -> String {
        fill(&self.front_template, entry)
    }

    /// Format the back of the card
    pub fn format_back(&self, entry: &Entry) -> String {
        fill(&self.back_template, entry)
    }
}

fn fill(template: &str, entry: &Entry) -> String {
    let to_example = entry.to_example.first().map(String::as_str).unwrap_or("");

    template
        .replace("{source}", &entry.from_word.to_string())
        .replace("{grammar}", &entry.from_word.grammar)
        .replace("{meanings}", &entry.meanings())
        .replace("{context}", &entry.context)
        .replace("{from_example}", &entry.from_example)
        .replace("{to_example}", to_example)
        .trim()
        .to_string()
}
