//! `ChunkState` — the Δ-stack monoid element (spec.md §3.2). Produced
//! by `scanner::scan`, consumed and combined by `combiner::combine`.

/// Per-enclosure min/net depth pair (spec.md §3.2, §4.3 step 2). The
/// min-depth / net-depth monoid is the same shape used for balanced
/// parenthesis checking; it composes associatively without needing
/// the full depth history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnclosureDelta {
    pub min_depth: i64,
    pub net_depth: i64,
}

impl EnclosureDelta {
    pub fn identity() -> Self {
        Self {
            min_depth: 0,
            net_depth: 0,
        }
    }

    /// `a ⊕ b` for a single enclosure id (spec.md §4.3 step 2).
    pub fn combine(a: EnclosureDelta, b: EnclosureDelta) -> Self {
        Self {
            min_depth: a.min_depth.min(a.net_depth + b.min_depth),
            net_depth: a.net_depth + b.net_depth,
        }
    }
}

/// What kind of unresolved candidate is sitting at a chunk's tail,
/// waiting on the next chunk to be resolved (spec.md §3.2
/// `dangling_end`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingKind {
    /// A terminator (or terminator pattern) whose preceding token was
    /// not a recognised abbreviation; only unresolved because the
    /// chunk ended before we could see what follows.
    Terminator,
    /// A terminator whose preceding token matched an abbreviation
    /// category; resolved to "no boundary" unless the following
    /// chunk's leading token looks like a confirmed sentence opener.
    Abbreviation,
    /// An ellipsis match that reached the end of the chunk before its
    /// boundary decision (default/context/exception cascade) could be
    /// fully evaluated against following context.
    Ellipsis,
}

/// A boundary candidate still open at the end of a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBoundary {
    pub kind: PendingKind,
    /// Chunk-local byte offset immediately after the candidate's
    /// terminating characters — where the boundary would land if
    /// confirmed.
    pub offset: usize,
    /// The token or pattern text itself (used to re-run the
    /// ellipsis/abbreviation matching logic once more context is
    /// available).
    pub token: String,
}

/// Context carried at the *start* of a chunk that the combiner needs
/// to reconcile against the *previous* chunk's `dangling_end`
/// (spec.md §3.2 `dangling_start`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DanglingStart {
    /// Verbatim leading text, up to a bounded lookback window, used to
    /// confirm or reject a pending boundary carried from the previous
    /// chunk.
    pub leading_text: String,
    /// Set when the chunk opens with one or more unmatched closing
    /// enclosure characters (closes that had no matching open within
    /// this chunk) — the id of the first such enclosure.
    pub opens_with_close: Option<usize>,
}

/// Context carried at the *end* of a chunk (spec.md §3.2
/// `dangling_end`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DanglingEnd {
    pub pending: Option<PendingBoundary>,
    /// Verbatim trailing text since the last confirmed boundary (or
    /// chunk start), bounded to the longest recognised pattern width.
    pub trailing_text: String,
}

/// The monoid element itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkState {
    pub boundaries: Vec<usize>,
    pub deltas: Vec<EnclosureDelta>,
    pub dangling_start: DanglingStart,
    pub dangling_end: DanglingEnd,
    pub length: usize,
}

impl ChunkState {
    /// The identity element for `enclosure_count` enclosure ids
    /// (spec.md §3.2 "Identity element").
    pub fn identity(enclosure_count: usize) -> Self {
        Self {
            boundaries: Vec::new(),
            deltas: vec![EnclosureDelta::identity(); enclosure_count],
            dangling_start: DanglingStart::default(),
            dangling_end: DanglingEnd::default(),
            length: 0,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.length == 0
    }
}
