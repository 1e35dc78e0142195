//! Streaming execution mode (spec.md §4.4 "Streaming mode"): pull
//! bounded-size chunks from a reader, accumulate `S ← S ⊕ scan(chunk)`,
//! and lazily emit confirmed sentences as soon as their boundary is
//! known, instead of holding the whole input in memory.

use std::collections::VecDeque;
use std::io::Read;
use std::sync::Arc;

use crate::combiner;
use crate::error::{Result, SbdError};
use crate::executor::CancellationToken;
use crate::rules::LanguageRules;
use crate::scanner::{self, ChunkState};
use crate::sentence::Sentence;

/// An iterator of `Sentence`s pulled incrementally from `R`. Memory use
/// is bounded by the configured chunk size plus one sentence's worth of
/// unflushed tail text — the accumulated `ChunkState` itself carries no
/// unbounded history (spec.md §3.2's monoid element is `O(enclosures)`
/// regardless of how much input has been folded into it).
pub struct SentenceStream<R> {
    reader: R,
    rules: Arc<LanguageRules>,
    chunk_bytes: usize,
    preserve_whitespace: bool,
    cancel: Option<CancellationToken>,

    enclosure_count: usize,
    acc: ChunkState,
    started: bool,
    finished: bool,

    /// Raw bytes read but not yet valid complete UTF-8 (a multi-byte
    /// scalar split across two reads).
    pending_bytes: Vec<u8>,
    /// Total bytes pulled from `reader` and consumed into `pending_bytes`
    /// or `buffer` so far — used to report `DecodeError::byte_offset`.
    consumed_bytes: usize,

    /// Retained text for every boundary not yet translated into an
    /// emitted `Sentence` — `buffer_base..buffer_base + buffer.len()`
    /// mirrors `flushed_to..acc.length`.
    buffer: String,
    buffer_base: usize,
    flushed_to: usize,

    queue: VecDeque<Sentence>,
}

impl<R: Read> SentenceStream<R> {
    pub fn new(
        reader: R,
        rules: Arc<LanguageRules>,
        stream_chunk_mb: usize,
        preserve_whitespace: bool,
        cancel: Option<CancellationToken>,
    ) -> Self {
        let enclosure_count = rules.compiled().enclosure_count();
        Self {
            reader,
            chunk_bytes: stream_chunk_mb.max(1) * 1024 * 1024,
            preserve_whitespace,
            cancel,
            enclosure_count,
            acc: ChunkState::identity(enclosure_count),
            started: false,
            finished: false,
            pending_bytes: Vec::new(),
            consumed_bytes: 0,
            buffer: String::new(),
            buffer_base: 0,
            flushed_to: 0,
            queue: VecDeque::new(),
            rules,
        }
    }

    fn rules(&self) -> &LanguageRules {
        &self.rules
    }

    /// Absorb `bytes` read from the source: carry over any incomplete
    /// trailing UTF-8 sequence, scan the valid prefix as one more
    /// non-final chunk, and flush whatever boundaries that confirmed.
    fn ingest(&mut self, bytes: &[u8]) -> Result<()> {
        self.pending_bytes.extend_from_slice(bytes);

        let valid_len = match std::str::from_utf8(&self.pending_bytes) {
            Ok(_) => self.pending_bytes.len(),
            Err(e) => {
                if e.error_len().is_some() {
                    return Err(SbdError::DecodeError {
                        encoding: "utf-8".to_string(),
                        byte_offset: self.consumed_bytes + e.valid_up_to(),
                    });
                }
                e.valid_up_to()
            }
        };

        if valid_len == 0 {
            return Ok(());
        }

        let text = String::from_utf8(self.pending_bytes[..valid_len].to_vec())
            .expect("valid_len bounds a verified UTF-8 prefix");
        self.pending_bytes.drain(..valid_len);
        self.consumed_bytes += valid_len;

        let is_first = !self.started;
        self.started = true;
        let chunk_state = scanner::scan(&text, &self.rules, is_first, false);
        let acc = std::mem::replace(&mut self.acc, ChunkState::identity(self.enclosure_count));
        self.acc = combiner::accumulate(acc, chunk_state, &self.rules);

        self.buffer.push_str(&text);
        self.flush(false);
        Ok(())
    }

    /// Resolve the accumulated state's dangling tail against true EOF
    /// and flush everything that remains.
    fn finalize(&mut self) {
        let acc = std::mem::replace(&mut self.acc, ChunkState::identity(self.enclosure_count));
        self.acc = combiner::finalize_tail(acc, self.rules());
        self.flush(true);
    }

    /// Move every confirmed boundary not yet emitted into `queue`, and
    /// drop the buffer text behind it. At `is_final`, also emit
    /// whatever trailing text remains after the last boundary.
    fn flush(&mut self, is_final: bool) {
        let mut boundaries: Vec<usize> = self.acc.boundaries.iter().copied().filter(|&b| b > self.flushed_to).collect();
        boundaries.sort_unstable();

        for end in boundaries {
            let local_start = self.flushed_to - self.buffer_base;
            let local_end = end.saturating_sub(self.buffer_base).min(self.buffer.len());
            if local_end <= local_start || !self.buffer.is_char_boundary(local_start) || !self.buffer.is_char_boundary(local_end) {
                continue;
            }
            let raw = &self.buffer[local_start..local_end];
            self.queue.push_back(make_sentence(raw, self.flushed_to, self.preserve_whitespace));
            self.flushed_to = end;
        }

        self.acc.boundaries.retain(|&b| b > self.flushed_to);

        let drop_local = self.flushed_to.saturating_sub(self.buffer_base);
        if drop_local > 0 {
            self.buffer.drain(..drop_local.min(self.buffer.len()));
            self.buffer_base = self.flushed_to;
        }

        if is_final && self.flushed_to < self.acc.length {
            let raw = self.buffer.clone();
            if !raw.trim().is_empty() {
                self.queue.push_back(make_sentence(&raw, self.flushed_to, self.preserve_whitespace));
            }
            self.flushed_to = self.acc.length;
            self.buffer.clear();
            self.buffer_base = self.flushed_to;
        }
    }
}

impl<R: Read> Iterator for SentenceStream<R> {
    type Item = Result<Sentence>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(sentence) = self.queue.pop_front() {
                return Some(Ok(sentence));
            }
            if self.finished {
                return None;
            }
            if let Some(token) = &self.cancel {
                if token.is_cancelled() {
                    self.finished = true;
                    return Some(Err(SbdError::Cancelled));
                }
            }

            let mut buf = vec![0u8; self.chunk_bytes];
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    if !self.pending_bytes.is_empty() {
                        self.finished = true;
                        return Some(Err(SbdError::DecodeError {
                            encoding: "utf-8".to_string(),
                            byte_offset: self.consumed_bytes,
                        }));
                    }
                    self.finalize();
                    self.finished = true;
                }
                Ok(n) => {
                    if let Err(e) = self.ingest(&buf[..n]) {
                        self.finished = true;
                        return Some(Err(e));
                    }
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(SbdError::InputError(e.to_string())));
                }
            }
        }
    }
}

fn make_sentence(raw: &str, start: usize, preserve_whitespace: bool) -> Sentence {
    let end = start + raw.len();
    let text = if preserve_whitespace { raw.to_string() } else { raw.trim().to_string() };
    Sentence::new(text, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::bundled;
    use std::io::Cursor;

    fn en() -> Arc<LanguageRules> {
        bundled::lookup("en").unwrap()
    }

    fn collect(text: &str, chunk_mb_as_bytes: usize) -> Vec<Sentence> {
        // tiny stand-in for MiB so tests can force many small reads.
        let stream = SentenceStream {
            reader: Cursor::new(text.as_bytes().to_vec()),
            rules: en(),
            chunk_bytes: chunk_mb_as_bytes,
            preserve_whitespace: false,
            cancel: None,
            enclosure_count: en().compiled().enclosure_count(),
            acc: ChunkState::identity(en().compiled().enclosure_count()),
            started: false,
            finished: false,
            pending_bytes: Vec::new(),
            consumed_bytes: 0,
            buffer: String::new(),
            buffer_base: 0,
            flushed_to: 0,
            queue: VecDeque::new(),
        };
        stream.map(|r| r.unwrap()).collect()
    }

    #[test]
    fn matches_sequential_when_pulled_in_one_chunk() {
        let text = "One. Two. Three.";
        let sentences = collect(text, 4096);
        assert_eq!(sentences.iter().map(|s| s.text.as_str()).collect::<Vec<_>>(), vec!["One.", "Two.", "Three."]);
    }

    #[test]
    fn matches_sequential_with_tiny_chunks() {
        let text = "Dr. Smith arrived. He said \"hello there.\" Then he left for good.";
        let whole = scanner::scan(text, &en(), true, true);
        let whole_sentences = crate::executor::materialize(&whole, text, false);

        let streamed = collect(text, 3); // force many reads, mid-word splits
        assert_eq!(streamed.len(), whole_sentences.len());
        for (a, b) in streamed.iter().zip(whole_sentences.iter()) {
            assert_eq!(a.text, b.text);
        }
    }

    #[test]
    fn empty_input_yields_no_sentences() {
        assert!(collect("", 4096).is_empty());
    }

    #[test]
    fn trailing_unterminated_text_is_emitted() {
        let sentences = collect("Complete sentence. Trailing fragment without punctuation", 4096);
        assert_eq!(sentences.last().unwrap().text, "Trailing fragment without punctuation");
    }

    #[test]
    fn invalid_trailing_utf8_is_a_decode_error() {
        let mut bytes = b"Hello world.".to_vec();
        bytes.push(0xFF);
        let stream = SentenceStream::new(Cursor::new(bytes), en(), 1, false, None);
        let results: Vec<_> = stream.collect();
        assert!(matches!(results.last(), Some(Err(SbdError::DecodeError { .. }))));
    }
}
