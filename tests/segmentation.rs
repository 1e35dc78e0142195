//! End-to-end segmentation scenarios (spec.md §8's seed table).

use pretty_assertions::assert_eq;
use sbd_core::{split, ExecutionMode, Input, SplitOptions};
use test_case::test_case;

fn texts(sentences: &[&str]) -> Vec<String> {
    sentences.iter().map(|s| s.to_string()).collect()
}

#[test_case(
    "Hello world. How are you? I'm fine!",
    "en",
    &["Hello world.", "How are you?", "I'm fine!"]
)]
#[test_case(
    "Dr. Smith went to the U.S.A. yesterday. He had a meeting.",
    "en",
    &["Dr. Smith went to the U.S.A. yesterday.", "He had a meeting."]
)]
#[test_case(
    "He said \"Hello there.\" Then he left.",
    "en",
    &["He said \"Hello there.\" Then he left."]
)]
#[test_case(
    "これは日本語です。とても面白い！最後の文。",
    "ja",
    &["これは日本語です。", "とても面白い！", "最後の文。"]
)]
#[test_case(
    "彼は「おはよう！」と言った。「本当ですか？」と私は聞きました。",
    "ja",
    &["彼は「おはよう！」と言った。", "「本当ですか？」と私は聞きました。"]
)]
fn seed_scenarios(input: &str, language: &str, expected: &[&str]) {
    let options = SplitOptions::for_language(language);
    let sentences = split(Input::from(input), &options).expect("split should succeed");
    let got: Vec<String> = sentences.into_iter().map(|s| s.text).collect();
    assert_eq!(got, texts(expected));
}

#[test]
fn preserve_whitespace_keeps_leading_gaps_in_text_and_offsets() {
    let text = "First sentence.    Second sentence.  Third.";
    let options = SplitOptions::for_language("en").with_preserve_whitespace(true);
    let sentences = split(Input::from(text), &options).unwrap();
    let got: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(got, vec!["First sentence.", "    Second sentence.", "  Third."]);
    for s in &sentences {
        assert_eq!(&text[s.start..s.end], s.text);
    }
}

#[test]
fn trimmed_sentences_still_span_their_leading_whitespace() {
    let text = "First sentence.    Second sentence.";
    let options = SplitOptions::for_language("en");
    let sentences = split(Input::from(text), &options).unwrap();
    assert_eq!(sentences[1].text, "Second sentence.");
    assert_eq!(&text[sentences[1].start..sentences[1].end], "    Second sentence.");
}

#[test]
fn determinism_across_modes_and_thread_counts() {
    let text = "Sentence one. Sentence two! Sentence three? Dr. Smith agreed. Done.".repeat(200);

    let sequential = split(
        Input::from(text.as_str()),
        &SplitOptions::for_language("en").with_execution_mode(ExecutionMode::Sequential),
    )
    .unwrap();

    for threads in [1usize, 2, 4] {
        let options = SplitOptions::for_language("en")
            .with_execution_mode(ExecutionMode::Parallel)
            .with_threads(threads)
            .with_chunk_kb(1);
        let parallel = split(Input::from(text.as_str()), &options).unwrap();
        assert_eq!(parallel, sequential, "mismatch at {threads} threads");
    }

    let streaming = split(
        Input::from(text.as_str()),
        &SplitOptions::for_language("en").with_execution_mode(ExecutionMode::Streaming),
    )
    .unwrap();
    assert_eq!(streaming, sequential);
}

#[test]
fn ellipsis_followed_by_capital_is_a_boundary() {
    let text = "Wait... What happened?";
    let sentences = split(Input::from(text), &SplitOptions::for_language("en")).unwrap();
    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[0].text, "Wait...");
    assert_eq!(sentences[1].text, "What happened?");
}

#[test]
fn ellipsis_followed_by_lowercase_is_not_a_boundary() {
    let text = "Wait... what happened?";
    let sentences = split(Input::from(text), &SplitOptions::for_language("en")).unwrap();
    assert_eq!(sentences.len(), 1);
    assert_eq!(sentences[0].text, "Wait... what happened?");
}

#[test]
fn unsupported_language_is_rejected_before_scanning() {
    let options = SplitOptions::for_language("xx");
    let err = split(Input::from("Hello."), &options).unwrap_err();
    assert!(matches!(err, sbd_core::SbdError::UnsupportedLanguage(_)));
}
