use palabra_translator::{Entry, FromWord, Section, ToWord, TranslateError, Translation};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

const UNTITLED_SECTION: &str = "Untitled Section";

pub(crate) fn selector(css: &str) -> Result<Selector, TranslateError> {
    Selector::parse(css).map_err(|e| TranslateError::ApiError(format!("bad selector {css}: {e}")))
}

fn regex(pattern: &str) -> Result<Regex, TranslateError> {
    Regex::new(pattern).map_err(|e| TranslateError::ApiError(format!("bad pattern {pattern}: {e}")))
}

/// Selectors and patterns used while walking a result page
struct PageSelectors {
    no_entry: Selector,
    table: Selector,
    rows: Selector,
    first_cell: Selector,
    from_word: Selector,
    from_grammar: Selector,
    to_word: Selector,
    pos: Selector,
    sense: Selector,
    context_cell: Selector,
    from_example: Selector,
    to_example: Selector,
    parenthesized: Regex,
    annotation: Regex,
}

impl PageSelectors {
    fn new() -> Result<Self, TranslateError> {
        Ok(Self {
            no_entry: selector("p#noEntryFound")?,
            table: selector("table.WRD")?,
            rows: selector("tr.even, tr.odd")?,
            first_cell: selector("tr td")?,
            from_word: selector("td.FrWrd strong")?,
            from_grammar: selector("td.FrWrd em.POS2")?,
            to_word: selector("td.ToWrd")?,
            pos: selector("em.POS2")?,
            sense: selector("span.dsense i")?,
            context_cell: selector("td:nth-child(2)")?,
            from_example: selector("td.FrEx")?,
            to_example: selector("td.ToEx")?,
            parenthesized: regex(r"\((.*?)\)")?,
            annotation: regex(r"ⓘ[^.]+\. *")?,
        })
    }
}

/// Parse a WordReference result page.
///
/// A page carrying the "no entry found" notice is reported as
/// [`TranslateError::NotFound`].
pub fn parse_translation(
    html: &str,
    word: &str,
    from_lang: &str,
    to_lang: &str,
    url: &str,
) -> Result<Translation, TranslateError> {
    let sel = PageSelectors::new()?;
    let document = Html::parse_document(html);

    if let Some(notice) = document.select(&sel.no_entry).next() {
        let message = collapse(&notice.text().collect::<String>());
        if !message.is_empty() {
            return Err(TranslateError::not_found(word, message));
        }
    }

    let mut translation = Translation {
        word: word.to_string(),
        from_lang: from_lang.to_string(),
        to_lang: to_lang.to_string(),
        url: url.to_string(),
        translations: vec![],
    };

    for table in document.select(&sel.table) {
        let entries = group_rows(table, &sel.rows)
            .iter()
            .map(|group| parse_entry(group, &sel))
            .collect::<Vec<_>>();

        let title = table
            .select(&sel.first_cell)
            .next()
            .and_then(|td| td.value().attr("title"))
            .unwrap_or(UNTITLED_SECTION)
            .to_string();

        // A later table with the same title replaces the earlier entries
        match translation.translations.iter_mut().find(|s| s.title == title) {
            Some(section) => section.entries = entries,
            None => translation.translations.push(Section { title, entries }),
        }
    }

    tracing::debug!(
        word,
        sections = translation.translations.len(),
        entries = translation.entries().count(),
        "parsed result page"
    );

    Ok(translation)
}

/// Rows of one entry share a class; a class change starts the next entry.
fn group_rows<'a>(table: ElementRef<'a>, rows: &Selector) -> Vec<Vec<ElementRef<'a>>> {
    let mut groups: Vec<Vec<ElementRef<'a>>> = vec![];
    let mut last_class = None;

    for row in table.select(rows) {
        let class = row.value().attr("class");
        match groups.last_mut() {
            Some(group) if class == last_class => group.push(row),
            _ => groups.push(vec![row]),
        }
        last_class = class;
    }

    groups
}

fn parse_entry(group: &[ElementRef<'_>], sel: &PageSelectors) -> Entry {
    let Some(first) = group.first() else {
        return Entry::default();
    };

    let from_word = FromWord {
        source: first_text(*first, &sel.from_word).replace('⇒', "").trim().to_string(),
        grammar: first_text(*first, &sel.from_grammar),
    };

    let to_word = group
        .iter()
        .filter_map(|row| {
            let cell = row.select(&sel.to_word).next()?;
            Some(ToWord {
                meaning: text_outside(cell, &sel.pos).replace('⇒', "").trim().to_string(),
                notes: first_text(*row, &sel.sense),
                grammar: first_text(cell, &sel.pos),
            })
        })
        .collect();

    let context = first
        .select(&sel.context_cell)
        .next()
        .map(|cell| cell.text().collect::<String>())
        .and_then(|text| {
            sel.parenthesized
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .unwrap_or_default();

    let from_example = group
        .iter()
        .find_map(|row| row.select(&sel.from_example).next())
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let to_example = group
        .iter()
        .filter_map(|row| row.select(&sel.to_example).next())
        .map(|cell| {
            let text = cell.text().collect::<String>();
            sel.annotation.replace_all(text.trim(), "").trim().to_string()
        })
        .collect();

    Entry {
        context,
        from_word,
        to_word,
        from_example,
        to_example,
    }
}

fn first_text(root: ElementRef<'_>, selector: &Selector) -> String {
    root.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Text of `root` skipping anything inside elements matching `skip`
fn text_outside(root: ElementRef<'_>, skip: &Selector) -> String {
    root.descendants()
        .filter(|node| {
            !node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| skip.matches(&ancestor))
        })
        .filter_map(|node| node.value().as_text().map(|text| text.to_string()))
        .collect()
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
