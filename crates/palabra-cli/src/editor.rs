use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, bail};

/// Line between the front and the back of a card being edited
pub const SEPARATOR: &str = "---";

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

/// Front and back text of a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardText {
    pub front: String,
    pub back: String,
}

impl CardText {
    /// Text put in the editor: front, separator line, back
    pub fn to_document(&self) -> String {
        format!("{}\n{SEPARATOR}\n{}\n", self.front, self.back)
    }

    /// Parse an edited document. An empty document means the card was dropped.
    pub fn from_document(document: &str) -> anyhow::Result<Option<Self>> {
        if document.trim().is_empty() {
            return Ok(None);
        }

        let mut front = Vec::new();
        let mut lines = document.lines();
        for line in lines.by_ref() {
            if line.trim_end() == SEPARATOR {
                let back = lines.collect::<Vec<_>>().join("\n");
                return Ok(Some(Self {
                    front: front.join("\n").trim().to_string(),
                    back: back.trim().to_string(),
                }));
            }
            front.push(line);
        }

        bail!("edited card has no `{SEPARATOR}` line between front and back")
    }
}

/// Open `card` in `editor` and return what was saved.
///
/// `editor` may carry arguments (`code --wait`); the file path is appended.
pub fn edit_card(editor: &str, card: &CardText) -> anyhow::Result<Option<CardText>> {
    let path = temp_path();
    fs::write(&path, card.to_document())
        .with_context(|| format!("failed to write {}", path.display()))?;

    let edited = run_editor(editor, &path).and_then(|()| {
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
    });
    if let Err(e) = fs::remove_file(&path) {
        tracing::warn!(path = %path.display(), "failed to remove card file: {e}");
    }

    CardText::from_document(&edited?)
}

fn run_editor(editor: &str, path: &Path) -> anyhow::Result<()> {
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("no editor configured");
    };

    tracing::debug!(program, path = %path.display(), "opening editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("failed to open editor {program}"))?;

    if !status.success() {
        bail!("editor {program} exited with {status}");
    }
    Ok(())
}

fn temp_path() -> PathBuf {
    let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("palabra_{}_{n}.txt", std::process::id()))
}
