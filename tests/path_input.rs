//! `Input::Path` end-to-end: a real file on disk, read either fully
//! (sequential/parallel) or via the streaming reader, per spec.md §6
//! ("a filesystem path, read lazily in streaming mode and fully in
//! parallel mode").

use std::io::Write;

use sbd_core::{split, ExecutionMode, Input, SplitOptions};

fn write_temp_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes()).expect("failed to write temp file");
    file.flush().expect("failed to flush temp file");
    file
}

#[test]
fn splits_a_path_input_sequentially() {
    let file = write_temp_file("Hello from disk. Second sentence here.");
    let options = SplitOptions::for_language("en").with_execution_mode(ExecutionMode::Sequential);
    let sentences = split(Input::path(file.path()), &options).unwrap();
    let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Hello from disk.", "Second sentence here."]);
}

#[test]
fn splits_a_path_input_via_streaming() {
    let file = write_temp_file("Streamed from disk. Dr. Smith confirmed it. Done.");
    let options = SplitOptions::for_language("en").with_execution_mode(ExecutionMode::Streaming);
    let sentences = split(Input::path(file.path()), &options).unwrap();
    let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Streamed from disk.", "Dr. Smith confirmed it.", "Done."]);
}

#[test]
fn missing_path_is_an_input_error() {
    let options = SplitOptions::for_language("en");
    let err = split(Input::path("/nonexistent/path/to/nowhere.txt"), &options).unwrap_err();
    assert!(matches!(err, sbd_core::SbdError::InputError(_)));
}

#[test]
fn sequential_and_streaming_agree_on_the_same_file() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();

    let file = write_temp_file("One. Two? Three! Dr. Who knows. Last one.");
    let sequential = split(
        Input::path(file.path()),
        &SplitOptions::for_language("en").with_execution_mode(ExecutionMode::Sequential),
    )
    .unwrap();
    let streaming = split(
        Input::path(file.path()),
        &SplitOptions::for_language("en").with_execution_mode(ExecutionMode::Streaming),
    )
    .unwrap();
    assert_eq!(sequential, streaming);
}
