use std::io::{self, Write};

use console::{StyledObject, style};
use palabra_translator::{Entry, Translation};

/// Colorized terminal rendering of a lookup result.
///
/// Only the source word, meanings, context and examples are printed; the
/// url, section titles, notes and target grammar stay in the data.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    styled: bool,
}

impl Renderer {
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }

    pub fn render<W: Write>(&self, translation: &Translation, out: &mut W) -> io::Result<()> {
        for entry in translation.entries() {
            self.render_entry(entry, out)?;
        }
        out.flush()
    }

    fn render_entry<W: Write>(&self, entry: &Entry, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{} ({})",
            self.paint(&entry.from_word.source).red().bold(),
            self.paint(&entry.from_word.grammar).dim(),
        )?;

        // Context is repeated under every meaning
        for to_word in &entry.to_word {
            writeln!(out, "\t\t {}", self.paint(&to_word.meaning).yellow().bold())?;
            writeln!(out, "\t\t {}", self.paint(&entry.context).green())?;
        }

        writeln!(out, "\t{}", self.paint(&entry.from_example).cyan())?;
        if let Some(example) = entry.to_example.first() {
            writeln!(out, "\t{}", self.paint(example).cyan())?;
        }

        writeln!(out)
    }

    fn paint<'a>(&self, text: &'a str) -> StyledObject<&'a str> {
        style(text).force_styling(self.styled)
    }
}
