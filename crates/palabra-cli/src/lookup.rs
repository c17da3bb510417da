use std::future::Future;
use std::io::{self, BufRead, Write};
use std::thread;

use anyhow::Context;
use palabra_translator::{DefaultPreprocessor, LanguageCode, Preprocessor, TranslateError, Translator};
use tokio::sync::mpsc;

use crate::render::Renderer;

pub const PROMPT: &str = "Enter a word: ";

/// What a single lookup cycle ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rendered,
    NotFound,
    /// Blank input, nothing looked up
    Skipped,
}

/// Lookup driver: one provider, one language pair, one output
pub struct Lookup<'a, W> {
    translator: &'a dyn Translator,
    from: LanguageCode,
    to: LanguageCode,
    renderer: Renderer,
    json: bool,
    out: W,
}

impl<'a, W: Write> Lookup<'a, W> {
    pub fn new(
        translator: &'a dyn Translator,
        from: LanguageCode,
        to: LanguageCode,
        renderer: Renderer,
        out: W,
    ) -> Self {
        Self {
            translator,
            from,
            to,
            renderer,
            json: false,
            out,
        }
    }

    /// Print results as pretty JSON instead of the colored layout
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// One lookup-and-display cycle. Not-found is reported on the output, not as an error.
    pub async fn lookup(&mut self, word: &str) -> anyhow::Result<Outcome> {
        let word = DefaultPreprocessor.process(word);
        if word.is_empty() {
            return Ok(Outcome::Skipped);
        }

        let result = self
            .translator
            .translate(&word, self.from.clone(), self.to.clone())
            .await;

        match result {
            Ok(translation) => {
                if self.json {
                    serde_json::to_writer_pretty(&mut self.out, &translation)?;
                    writeln!(self.out)?;
                    self.out.flush()?;
                } else {
                    self.renderer.render(&translation, &mut self.out)?;
                }
                Ok(Outcome::Rendered)
            }
            Err(TranslateError::NotFound { message, .. }) => {
                tracing::debug!(%word, %message, "no entry");
                writeln!(self.out, "No translation found for {word}")?;
                self.out.flush()?;
                Ok(Outcome::NotFound)
            }
            Err(e) => Err(e).with_context(|| format!("failed to look up {word}")),
        }
    }

    /// Prompt until `shutdown` resolves or input ends.
    ///
    /// Provider failures are reported and the loop goes on.
    pub async fn interactive<F>(
        &mut self,
        mut lines: mpsc::Receiver<io::Result<String>>,
        shutdown: F,
    ) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut cycles = 0usize;

        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;

            let line = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                line = lines.recv() => Some(line),
            };

            // Interrupted (outer None) or end of input (inner None)
            let line = match line {
                Some(Some(Ok(line))) => line,
                Some(Some(Err(e))) => {
                    tracing::warn!("failed to read input: {e}");
                    writeln!(self.out, "Error: failed to read input: {e}")?;
                    continue;
                }
                None | Some(None) => {
                    writeln!(self.out)?;
                    self.out.flush()?;
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            if cycles > 0 {
                write!(self.out, "\n\n")?;
            }
            cycles += 1;

            let result = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                result = self.lookup(&line) => Some(result),
            };

            match result {
                None => {
                    writeln!(self.out)?;
                    self.out.flush()?;
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::error!("{e:#}");
                    writeln!(self.out, "Error: {e:#}")?;
                    self.out.flush()?;
                }
            }
        }

        Ok(())
    }
}

/// Read `input` line by line on a dedicated thread.
///
/// The read is never awaited on the runtime, so shutting down does not wait
/// for a pending line. Invalid UTF-8 is replaced, not reported. The channel
/// closes at end of input or after a read error.
pub fn spawn_line_reader<R>(mut input: R) -> mpsc::Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);

    thread::spawn(move || {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let line = match input.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => Ok(String::from_utf8_lossy(&buf)
                    .trim_end_matches(['\n', '\r'])
                    .to_string()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => Err(e),
            };

            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });

    rx
}
