//! Parallel execution mode (spec.md §4.4 "Parallel mode"): split into
//! UTF-8-safe chunks, scan them on a work-stealing pool, reduce with
//! `⊕` in input order.

use std::sync::Arc;

use crate::combiner;
use crate::config::SplitOptions;
use crate::error::{Result, SbdError};
use crate::executor::CancellationToken;
use crate::rules::LanguageRules;
use crate::scanner::{self, ChunkState};

use rayon::prelude::*;

/// Split `text` into chunks targeting `chunk_bytes`, landing every cut
/// on a `char` boundary (spec.md §4.4 "actual cuts must land on scalar
/// boundaries").
pub fn split_boundaries(text: &str, chunk_bytes: usize) -> Vec<(usize, usize)> {
    if text.is_empty() {
        return Vec::new();
    }
    let chunk_bytes = chunk_bytes.max(1);
    let mut ranges = Vec::new();
    let mut start = 0usize;
    let len = text.len();
    while start < len {
        let mut end = (start + chunk_bytes).min(len);
        while end < len && !text.is_char_boundary(end) {
            end += 1;
        }
        ranges.push((start, end));
        start = end;
    }
    ranges
}

pub fn run(
    text: &str,
    rules: &Arc<LanguageRules>,
    options: &SplitOptions,
    cancel: Option<&CancellationToken>,
) -> Result<ChunkState> {
    if let Some(token) = cancel {
        if token.is_cancelled() {
            return Err(SbdError::Cancelled);
        }
    }

    let ranges = split_boundaries(text, options.chunk_kb * 1024);
    if ranges.is_empty() {
        return Ok(ChunkState::identity(rules.enclosure_count()));
    }
    let last = ranges.len() - 1;

    let scan_one = |idx: usize, (start, end): (usize, usize)| -> ChunkState {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return ChunkState::identity(rules.enclosure_count());
        }
        let is_first = idx == 0;
        let is_last = idx == last;
        scanner::scan(&text[start..end], rules, is_first, is_last)
    };

    let states: Vec<ChunkState> = if let Some(threads) = options.threads {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| SbdError::InternalError(format!("failed to build thread pool: {e}")))?;
        pool.install(|| {
            ranges
                .par_iter()
                .enumerate()
                .map(|(idx, &range)| scan_one(idx, range))
                .collect()
        })
    } else {
        ranges
            .par_iter()
            .enumerate()
            .map(|(idx, &range)| scan_one(idx, range))
            .collect()
    };

    if let Some(token) = cancel {
        if token.is_cancelled() {
            return Err(SbdError::Cancelled);
        }
    }

    Ok(combiner::reduce_in_order(states, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::bundled;

    #[test]
    fn boundaries_land_on_char_edges() {
        let text = "これは日本語です。とても面白い！";
        let ranges = split_boundaries(text, 5);
        for &(s, e) in &ranges {
            assert!(text.is_char_boundary(s));
            assert!(text.is_char_boundary(e));
        }
        let reassembled: String = ranges.iter().map(|&(s, e)| &text[s..e]).collect();
        assert_eq!(reassembled, text);
    }

    #[test]
    fn parallel_matches_sequential_on_plain_text() {
        let rules = bundled::lookup("en").unwrap();
        let text = "Sentence one. Sentence two. Sentence three. ".repeat(50);
        let options = SplitOptions {
            chunk_kb: 1, // force many small chunks
            ..SplitOptions::for_language("en")
        };
        let par = run(&text, &rules, &options, None).unwrap();
        let seq = crate::executor::sequential::run(&text, &rules);
        assert_eq!(par.boundaries, seq.boundaries);
    }

    #[test]
    fn cancellation_short_circuits() {
        let rules = bundled::lookup("en").unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let text = "Sentence one. Sentence two.".repeat(10000);
        let options = SplitOptions::for_language("en");
        let result = run(&text, &rules, &options, Some(&token));
        assert!(matches!(result, Err(SbdError::Cancelled)));
    }
}
