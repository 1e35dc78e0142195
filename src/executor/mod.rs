//! Orchestrates [`crate::scanner::scan`] and [`crate::combiner::combine`]
//! under one of the three execution strategies (spec.md §4.4).

pub mod parallel;
pub mod sequential;
pub mod streaming;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::{ExecutionMode, SplitOptions};
use crate::error::{Result, SbdError};
use crate::rules::LanguageRules;
use crate::scanner::ChunkState;
use crate::sentence::Sentence;

/// Cooperative cancellation signal (spec.md §5 "Cancellation semantics").
/// Cheap to clone; every clone observes the same underlying flag.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Signal cancellation. Takes effect at the next between-chunks
    /// (parallel) or between-pulls (streaming) check point.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Picks sequential, parallel, or streaming by input size and source
/// kind (spec.md §4.4 "Mode selection (adaptive default)").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedMode {
    Sequential,
    Parallel,
    Streaming,
}

/// `is_materialized` is true when the whole input is already in
/// memory (`Text`, `Bytes`, or a `Path`/`Reader` the caller chose to
/// read eagerly); false for a source that will be pulled incrementally.
pub fn resolve_mode(requested: ExecutionMode, input_len: usize, is_materialized: bool) -> ResolvedMode {
    match requested {
        ExecutionMode::Sequential => ResolvedMode::Sequential,
        ExecutionMode::Parallel => ResolvedMode::Parallel,
        ExecutionMode::Streaming => ResolvedMode::Streaming,
        ExecutionMode::Adaptive => {
            if input_len <= crate::config::DEFAULT_SEQUENTIAL_THRESHOLD {
                ResolvedMode::Sequential
            } else if is_materialized && input_len <= crate::config::DEFAULT_PARALLEL_CEILING {
                ResolvedMode::Parallel
            } else {
                ResolvedMode::Streaming
            }
        }
    }
}

/// Run sequential or parallel mode over a fully materialized `text`,
/// then translate the resulting `ChunkState` into `Sentence`s.
pub fn run_in_memory(
    text: &str,
    rules: &Arc<LanguageRules>,
    options: &SplitOptions,
    mode: ResolvedMode,
    cancel: Option<&CancellationToken>,
) -> Result<Vec<Sentence>> {
    if let Some(token) = cancel {
        if token.is_cancelled() {
            return Err(SbdError::Cancelled);
        }
    }

    let state = match mode {
        ResolvedMode::Sequential => {
            tracing::debug!(len = text.len(), "running sequential scan");
            sequential::run(text, rules)
        }
        ResolvedMode::Parallel => {
            tracing::debug!(len = text.len(), chunk_kb = options.chunk_kb, "running parallel scan");
            parallel::run(text, rules, options, cancel)?
        }
        ResolvedMode::Streaming => {
            // A materialized `text` can still be driven through the
            // streaming path (e.g. the caller forced `Streaming`
            // explicitly); wrap it as a reader over its own bytes.
            tracing::debug!(len = text.len(), "running streaming scan over in-memory text");
            let stream = streaming::SentenceStream::new(
                std::io::Cursor::new(text.as_bytes().to_vec()),
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
    };

    if let Some(token) = cancel {
        if token.is_cancelled() {
            return Err(SbdError::Cancelled);
        }
    }

    Ok(materialize(&state, text, options.preserve_whitespace))
}

/// Translate a fully-resolved `ChunkState`'s confirmed boundaries into
/// `Sentence`s with global byte offsets (spec.md §4.5 "Offset
/// semantics").
pub fn materialize(state: &ChunkState, text: &str, preserve_whitespace: bool) -> Vec<Sentence> {
    let mut sentences = Vec::with_capacity(state.boundaries.len() + 1);
    let mut start = 0usize;
    let mut boundaries = state.boundaries.clone();
    boundaries.sort_unstable();
    for &end in &boundaries {
        if end <= start || end > text.len() {
            continue;
        }
        sentences.push(make_sentence(&text[start..end], start, preserve_whitespace));
        start = end;
    }
    if start < text.len() {
        let raw = &text[start..];
        if !raw.trim().is_empty() {
            sentences.push(make_sentence(raw, start, preserve_whitespace));
        }
    }
    sentences
}

fn make_sentence(raw: &str, start: usize, preserve_whitespace: bool) -> Sentence {
    let end = start + raw.len();
    let text = if preserve_whitespace {
        raw.to_string()
    } else {
        raw.trim().to_string()
    };
    Sentence::new(text, start, end)
}
