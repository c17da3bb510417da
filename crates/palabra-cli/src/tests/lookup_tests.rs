use std::future::{pending, ready};
use std::sync::Arc;
use std::time::{Duration, Instant};

use palabra_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};
use tokio::sync::Notify;

use super::{FakeTranslator, house};
use crate::lookup::{Lookup, Outcome, PROMPT, spawn_line_reader};
use crate::render::Renderer;

/// Provider whose lookups never finish; `started` fires when one begins
#[derive(Default)]
struct StalledTranslator {
    started: Arc<Notify>,
}

#[async_trait::async_trait]
impl Translator for StalledTranslator {
    async fn translate(
        &self,
        _word: &str,
        _from: LanguageCode,
        _to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        self.started.notify_one();
        pending().await
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "stalled".to_string(),
            homepage: String::new(),
        }
    }
}

fn lookup(translator: &dyn Translator) -> Lookup<'_, Vec<u8>> {
    Lookup::new(translator, "en".into(), "es".into(), Renderer::new(false), Vec::new())
}

fn rendered_house() -> String {
    let mut out = Vec::new();
    Renderer::new(false).render(&house(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn output(lookup: Lookup<'_, Vec<u8>>) -> String {
    String::from_utf8(lookup.into_output()).unwrap()
}

#[tokio::test]
async fn unknown_word_prints_only_the_not_found_message() {
    let translator = FakeTranslator::new();
    let mut lookup = lookup(&translator);

    let outcome = lookup.lookup("qwzx").await.expect("lookup");

    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(output(lookup), "No translation found for qwzx\n");
}

#[tokio::test]
async fn known_word_is_rendered() {
    let translator = FakeTranslator::new();
    let mut lookup = lookup(&translator);

    let outcome = lookup.lookup("house").await.expect("lookup");

    assert_eq!(outcome, Outcome::Rendered);
    assert_eq!(output(lookup), rendered_house());
    assert_eq!(
        translator.calls(),
        [("house".to_string(), "en".to_string(), "es".to_string())]
    );
}

#[tokio::test]
async fn query_is_normalized_before_lookup() {
    let translator = FakeTranslator::new();
    let mut lookup = lookup(&translator);

    lookup.lookup("  house \n").await.expect("lookup");

    assert_eq!(translator.calls()[0].0, "house");
}

#[tokio::test]
async fn blank_word_is_skipped() {
    let translator = FakeTranslator::new();
    let mut lookup = lookup(&translator);

    let outcome = lookup.lookup("   ").await.expect("lookup");

    assert_eq!(outcome, Outcome::Skipped);
    assert!(translator.calls().is_empty());
    assert_eq!(output(lookup), "");
}

#[tokio::test]
async fn provider_failure_propagates_in_single_word_mode() {
    let translator = FakeTranslator::new();
    let mut lookup = lookup(&translator);

    let err = lookup.lookup("boom").await.unwrap_err();

    assert!(format!("{err:#}").contains("failed to look up boom"));
    assert_eq!(output(lookup), "");
}

#[tokio::test]
async fn json_mode_prints_the_result_tree() {
    let translator = FakeTranslator::new();
    let mut lookup = lookup(&translator).json(true);

    lookup.lookup("house").await.expect("lookup");

    let value: serde_json::Value = serde_json::from_str(&output(lookup)).expect("json");
    assert_eq!(value["word"], "house");
    assert_eq!(value["translations"][0]["entries"][0]["to_word"][0]["meaning"], "casa");
}

#[tokio::test]
async fn interactive_loop_separates_cycles_and_stops_at_end_of_input() {
    let translator = FakeTranslator::new();
    let mut lookup = lookup(&translator);

    let input: &[u8] = b"house\n\nqwzx\n";
    lookup.interactive(spawn_line_reader(input), pending()).await.expect("loop");

    let expected = format!(
        "{PROMPT}{house}{PROMPT}{PROMPT}\n\nNo translation found for qwzx\n{PROMPT}\n",
        house = rendered_house()
    );
    assert_eq!(output(lookup), expected);
    assert_eq!(translator.calls().len(), 2);
}

#[tokio::test]
async fn interactive_loop_stops_on_interrupt() {
    let translator = FakeTranslator::new();
    let mut lookup = lookup(&translator);

    let input: &[u8] = b"house\n";
    lookup.interactive(spawn_line_reader(input), ready(())).await.expect("loop");

    assert_eq!(output(lookup), format!("{PROMPT}\n"));
    assert!(translator.calls().is_empty());
}

#[tokio::test]
async fn interactive_loop_survives_provider_failures() {
    let translator = FakeTranslator::new();
    let mut lookup = lookup(&translator);

    let input: &[u8] = b"boom\nhouse\n";
    lookup.interactive(spawn_line_reader(input), pending()).await.expect("loop");

    let output = output(lookup);
    assert!(output.contains("Error: failed to look up boom"));
    assert!(output.ends_with(&format!("\n\n{}{PROMPT}\n", rendered_house())));
}

#[tokio::test]
async fn invalid_utf8_line_does_not_end_the_loop() {
    let translator = FakeTranslator::new();
    let mut lookup = lookup(&translator);

    let input: &[u8] = b"caf\xe9\nhouse\n";
    lookup.interactive(spawn_line_reader(input), pending()).await.expect("loop");

    let calls: Vec<_> = translator.calls().into_iter().map(|(word, _, _)| word).collect();
    assert_eq!(calls, ["caf\u{fffd}", "house"]);

    let output = output(lookup);
    assert!(output.contains("No translation found for caf\u{fffd}\n"));
    assert!(output.ends_with(&format!("\n\n{}{PROMPT}\n", rendered_house())));
}

#[tokio::test]
async fn interrupt_during_a_pending_lookup_ends_the_loop() {
    let translator = StalledTranslator::default();
    let started = translator.started.clone();
    let mut lookup = lookup(&translator);

    let input: &[u8] = b"house\n";
    let shutdown = async move { started.notified().await };
    tokio::time::timeout(
        Duration::from_secs(5),
        lookup.interactive(spawn_line_reader(input), shutdown),
    )
    .await
    .expect("loop returned")
    .expect("loop");

    assert_eq!(output(lookup), format!("{PROMPT}\n"));
}

#[cfg(unix)]
#[test]
fn interrupt_with_input_still_open_does_not_hold_the_runtime() {
    use std::io::BufReader;
    use std::os::unix::net::UnixStream;

    // The writer stays open, so a read on the other end blocks
    let (reader, _writer) = UnixStream::pair().unwrap();
    let translator = FakeTranslator::new();
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let output = runtime.block_on(async {
        let mut lookup = lookup(&translator);
        let lines = spawn_line_reader(BufReader::new(reader));
        let shutdown = tokio::time::sleep(Duration::from_millis(50));

        tokio::time::timeout(Duration::from_secs(5), lookup.interactive(lines, shutdown))
            .await
            .expect("loop returned")
            .expect("loop");
        output(lookup)
    });

    let started = Instant::now();
    runtime.shutdown_timeout(Duration::from_secs(3));
    assert!(started.elapsed() < Duration::from_secs(1));

    assert_eq!(output, format!("{PROMPT}\n"));
    assert!(translator.calls().is_empty());
}
