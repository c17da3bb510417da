use std::collections::BTreeMap;

use palabra_translator::TranslateError;
use scraper::Html;

use crate::parser::selector;

/// A language pair offered by WordReference, e.g. `enes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    pub from: String,
    pub to: String,
}

/// Parse the dictionary picker on the WordReference homepage.
///
/// Options look like `<option id="enes">English-Spanish</option>`. With a
/// filter, only pairs whose code or label occurs in it (case-insensitively)
/// are kept.
pub fn parse_dictionaries(
    html: &str,
    filter: Option<&str>,
) -> Result<BTreeMap<String, Dictionary>, TranslateError> {
    let options = selector("select#fSelect optgroup option")?;
    let document = Html::parse_document(html);
    let filter = filter.map(str::to_lowercase).filter(|f| !f.is_empty());

    let mut dictionaries = BTreeMap::new();

    for option in document.select(&options) {
        let Some(id) = option.value().attr("id") else {
            continue;
        };
        let text = option.text().collect::<String>();
        let Some((from_label, to_label)) = text.trim().split_once('-') else {
            continue;
        };
        let (Some(from_code), Some(to_code)) = (id.get(..2), id.get(2..)) else {
            continue;
        };

        let (from_label, to_label) = (from_label.trim(), to_label.trim());

        if let Some(filter) = &filter {
            let matches = [from_code, from_label, to_code, to_label]
                .iter()
                .any(|part| !part.is_empty() && filter.contains(&part.to_lowercase()));
            if !matches {
                continue;
            }
        }

        dictionaries.insert(
            format!("{from_code}{to_code}"),
            Dictionary {
                from: from_label.to_string(),
                to: to_label.to_string(),
            },
        );
    }

    Ok(dictionaries)
}
