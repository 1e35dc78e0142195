//! The public segmentation entry points (spec.md §6 "Segmentation
//! API"): `split` for materialized output, `iter_split` for a lazily
//! produced stream, both dispatching on `Input` and `SplitOptions`.

use std::fs::File;
use std::io::Read;
use std::sync::Arc;

use crate::config::SplitOptions;
use crate::error::{Result, SbdError};
use crate::executor::{self, CancellationToken, ResolvedMode};
use crate::input::{Encoding, Input};
use crate::rules::LanguageRules;
use crate::sentence::Sentence;

/// Segment `input` into sentences, materializing the full result.
///
/// Validates `options` before touching `input` (spec.md §6: "yield
/// `ConfigError` before any scanning begins").
pub fn split(input: Input, options: &SplitOptions) -> Result<Vec<Sentence>> {
    split_cancellable(input, options, None)
}

/// As `split`, but checked against `cancel` between chunks (parallel
/// mode) or between pulls (streaming mode).
pub fn split_cancellable(input: Input, options: &SplitOptions, cancel: Option<&CancellationToken>) -> Result<Vec<Sentence>> {
    options.validate()?;
    let rules = options.resolve_rules()?;

    match materialize_input(input, options)? {
        Materialized::Text(text) => {
            let mode = executor::resolve_mode(options.execution_mode, text.len(), true);
            tracing::debug!(mode = ?mode, bytes = text.len(), language = rules.code(), "splitting materialized input");
            executor::run_in_memory(&text, &rules, options, mode, cancel)
        }
        Materialized::Reader(reader) => {
            let mode = executor::resolve_mode(options.execution_mode, 0, false);
            tracing::debug!(mode = ?mode, language = rules.code(), "splitting streamed input");
            run_reader_to_completion(reader, &rules, options, mode, cancel)
        }
    }
}

/// Segment `input` lazily: sentences are produced as they are
/// confirmed rather than all at once (spec.md §6 "`iter_split`").
///
/// Sequential and parallel modes still need the whole input decoded
/// up front — only a reader/path source driven through streaming mode
/// actually yields sentences before the source is exhausted.
pub fn iter_split(input: Input, options: &SplitOptions) -> Result<Box<dyn Iterator<Item = Result<Sentence>> + Send>> {
    iter_split_cancellable(input, options, None)
}

pub fn iter_split_cancellable(
    input: Input,
    options: &SplitOptions,
    cancel: Option<&CancellationToken>,
) -> Result<Box<dyn Iterator<Item = Result<Sentence>> + Send>> {
    options.validate()?;
    let rules = options.resolve_rules()?;

    match materialize_input(input, options)? {
        Materialized::Text(text) => {
            let mode = executor::resolve_mode(options.execution_mode, text.len(), true);
            if mode == ResolvedMode::Streaming {
                let stream = crate::executor::streaming::SentenceStream::new(
                    std::io::Cursor::new(text.into_bytes()),
                    rules,
                    options.stream_chunk_mb,
                    options.preserve_whitespace,
                    cancel.cloned(),
                );
                Ok(Box::new(stream))
            } else {
                let sentences = executor::run_in_memory(&text, &rules, options, mode, cancel)?;
                Ok(Box::new(sentences.into_iter().map(Ok)))
            }
        }
        Materialized::Reader(reader) => {
            let stream = crate::executor::streaming::SentenceStream::new(
                reader,
                rules,
                options.stream_chunk_mb,
                options.preserve_whitespace,
                cancel.cloned(),
            );
            Ok(Box::new(stream))
        }
    }
}

enum Materialized {
    Text(String),
    Reader(Box<dyn Read + Send>),
}

/// Resolve an `Input` down to either already-decoded text or a pull
/// reader, performing the one decoding step every variant needs:
/// strict UTF-8 validation for `Text`/paths read eagerly, declared
/// transcoding for `Bytes` (spec.md §9 "declared encoding is
/// transcoded to UTF-8 before scanning").
fn materialize_input(input: Input, options: &SplitOptions) -> Result<Materialized> {
    match input {
        Input::Text(text) => Ok(Materialized::Text(text)),
        Input::Bytes { data, encoding } => Ok(Materialized::Text(decode_bytes(&data, encoding)?)),
        Input::Path(path) => {
            // Large files still benefit from streaming: only read the
            // whole path eagerly if the caller is going to need a
            // materialized text anyway (sequential/parallel or an
            // adaptive decision made once the size is known).
            let metadata = std::fs::metadata(&path).map_err(|e| SbdError::InputError(e.to_string()))?;
            let wants_streaming = matches!(options.execution_mode, crate::config::ExecutionMode::Streaming)
                || (options.execution_mode == crate::config::ExecutionMode::Adaptive
                    && metadata.len() as usize > crate::config::DEFAULT_PARALLEL_CEILING);
            if wants_streaming {
                let file = File::open(&path).map_err(|e| SbdError::InputError(e.to_string()))?;
                Ok(Materialized::Reader(Box::new(file)))
            } else {
                let bytes = std::fs::read(&path).map_err(|e| SbdError::InputError(e.to_string()))?;
                Ok(Materialized::Text(decode_bytes(&bytes, options.encoding)?))
            }
        }
        Input::Reader(reader) => Ok(Materialized::Reader(reader)),
    }
}

/// Read a non-materialized source to completion under sequential or
/// parallel mode (the caller requested one explicitly, or the input
/// turned out small enough once bytes started arriving).
fn run_reader_to_completion(
    mut reader: Box<dyn Read + Send>,
    rules: &Arc<LanguageRules>,
    options: &SplitOptions,
    mode: ResolvedMode,
    cancel: Option<&CancellationToken>,
) -> Result<Vec<Sentence>> {
    if mode == ResolvedMode::Streaming {
        let stream = crate::executor::streaming::SentenceStream::new(
            reader,
            Arc::clone(rules),
            options.stream_chunk_mb,
            options.preserve_whitespace,
            cancel.cloned(),
        );
        let mut sentences = Vec::new();
        for s in stream {
            sentences.push(s?);
        }
        return Ok(sentences);
    }

    let mut raw = Vec::new();
    reader.read_to_end(&mut raw).map_err(|e| SbdError::InputError(e.to_string()))?;
    let text = decode_bytes(&raw, options.encoding)?;
    let mode = executor::resolve_mode(options.execution_mode, text.len(), true);
    executor::run_in_memory(&text, rules, options, mode, cancel)
}

/// Decode `bytes` per `encoding` (spec.md §9). UTF-8 is validated
/// strictly; ASCII and Latin-1 are transcoded via `encoding_rs` (the
/// latter as its practical superset, Windows-1252, matching every
/// other ecosystem tool's "Latin-1" label).
fn decode_bytes(bytes: &[u8], encoding: Encoding) -> Result<String> {
    match encoding {
        Encoding::Utf8 => std::str::from_utf8(bytes).map(str::to_string).map_err(|e| SbdError::DecodeError {
            encoding: "utf-8".to_string(),
            byte_offset: e.valid_up_to(),
        }),
        Encoding::Ascii => {
            if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
                return Err(SbdError::DecodeError {
                    encoding: "ascii".to_string(),
                    byte_offset: pos,
                });
            }
            Ok(bytes.iter().map(|&b| b as char).collect())
        }
        Encoding::Latin1 => {
            let (text, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
            if had_errors {
                return Err(SbdError::DecodeError {
                    encoding: "latin-1".to_string(),
                    byte_offset: 0,
                });
            }
            Ok(text.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SplitOptions;

    #[test]
    fn splits_plain_text() {
        let options = SplitOptions::for_language("en");
        let sentences = split(Input::from("Hello world. Goodbye world."), &options).unwrap();
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn rejects_zero_chunk_kb_before_scanning() {
        let options = SplitOptions {
            chunk_kb: 0,
            ..SplitOptions::for_language("en")
        };
        let err = split(Input::from("Hello."), &options).unwrap_err();
        assert!(matches!(err, SbdError::ConfigError { .. }));
    }

    #[test]
    fn unsupported_language_is_reported() {
        let options = SplitOptions::for_language("klingon");
        let err = split(Input::from("Hello."), &options).unwrap_err();
        assert!(matches!(err, SbdError::UnsupportedLanguage(_)));
    }

    #[test]
    fn ascii_bytes_roundtrip() {
        let options = SplitOptions::for_language("en");
        let input = Input::bytes(b"Plain ascii text. Two sentences.".to_vec(), Encoding::Ascii);
        let sentences = split(input, &options).unwrap();
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn invalid_utf8_bytes_report_decode_error() {
        let options = SplitOptions::for_language("en");
        let input = Input::bytes(vec![b'A', b'B', 0xFF, b'C'], Encoding::Utf8);
        let err = split(input, &options).unwrap_err();
        assert!(matches!(err, SbdError::DecodeError { byte_offset: 2, .. }));
    }

    #[test]
    fn iter_split_yields_same_sentences_as_split() {
        let options = SplitOptions::for_language("en");
        let text = "One. Two. Three.";
        let via_split = split(Input::from(text), &options).unwrap();
        let via_iter: Vec<_> = iter_split(Input::from(text), &options).unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(via_split, via_iter);
    }
}
