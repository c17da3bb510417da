use palabra_translator::Entry;
use serde::{Deserialize, Serialize};

const SEPARATOR: &str = " — ";

/// One generated sentence and its translation, emphasis markers removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub source: String,
    pub target: String,
}

/// System and user prompts asking for `count` sentences built around `entry`
pub fn prompt_for(entry: &Entry, count: usize, from: &str, to: &str) -> (String, String) {
    let system = format!(
        "You are a language learning assistant. Generate {count} short example sentences \
         in the language with ISO code \"{from}\" that use the given word with the given meaning. \
         Include a translation into the language with ISO code \"{to}\" for each. \
         Wrap the word in the sentence with **asterisks** for emphasis. \
         Format each as: `- <sentence>{SEPARATOR}<translation>`"
    );

    let meanings = entry
        .to_word
        .iter()
        .map(|to_word| to_word.meaning.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let user = format!("Word: {}\nMeaning: {meanings}", entry.from_word.source);

    (system, user)
}

/// Parse `- sentence — translation` lines; anything else is ignored
pub fn parse_phrases(raw: &str) -> Vec<Phrase> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let line = line.strip_prefix("- ").unwrap_or(line).replace("**", "");
            let (source, target) = line.split_once(SEPARATOR)?;
            Some(Phrase {
                source: source.to_string(),
                target: target.to_string(),
            })
        })
        .collect()
}
