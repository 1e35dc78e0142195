//! The associative combine operation `⊕` on [`ChunkState`] (spec.md
//! §4.3). This is the correctness backbone of parallel and streaming
//! execution: `scan(x ++ y)` must equal
//! `combine(scan_with_flags(x, first, false), scan_with_flags(y, false, last), rules)`
//! for any split point — see `tests/associativity.rs`.

use crate::rules::LanguageRules;
use crate::scanner::state::{ChunkState, DanglingEnd, EnclosureDelta, PendingKind};

/// `a ⊕ b`: combine two adjacent chunk states, in input order, into
/// the state that represents their concatenation.
pub fn combine(a: ChunkState, b: ChunkState, rules: &LanguageRules) -> ChunkState {
    if a.is_identity() {
        return b;
    }
    if b.is_identity() {
        return a;
    }

    let compiled = rules.compiled();

    // Step 3: reconcile a's dangling tail against b's dangling head
    // before anything else, since the reconciled boundary (if any)
    // must be spliced between a's and b's own boundaries.
    let reconciled = a.dangling_end.pending.as_ref().and_then(|pending| {
        match pending.kind {
            PendingKind::Terminator => {
                // The preceding token was already confirmed not to be a
                // recognised abbreviation in-chunk (scanner/mod.rs's
                // non-abbreviation terminator branch commits
                // unconditionally) — nothing about the next chunk's
                // opening text can retroactively undo that.
                Some(pending.offset)
            }
            PendingKind::Abbreviation => {
                // Dropped if the next chunk opens with a lowercase
                // continuation; confirmed if it instead looks like a
                // genuine sentence opener (mirrors the scanner's own
                // in-chunk abbreviation rule — spec.md §4.2 step 4).
                if compiled.confirms_sentence_start(&b.dangling_start.leading_text) {
                    Some(pending.offset)
                } else {
                    None
                }
            }
            PendingKind::Ellipsis => {
                if compiled.ellipsis_is_boundary(&b.dangling_start.leading_text) {
                    Some(pending.offset)
                } else {
                    None
                }
            }
        }
    });

    // Step 1: offsets.
    let a_len = a.length;
    let mut boundaries = a.boundaries;
    if let Some(offset) = reconciled {
        boundaries.push(offset);
    }
    boundaries.extend(b.boundaries.iter().map(|&off| off + a_len));

    // Step 2: enclosure depths — the min-depth/net-depth monoid.
    debug_assert_eq!(a.deltas.len(), b.deltas.len());
    let deltas: Vec<EnclosureDelta> = a
        .deltas
        .iter()
        .zip(b.deltas.iter())
        .map(|(&da, &db)| EnclosureDelta::combine(da, db))
        .collect();

    // Step 4: the combined dangling context is the new edges of the
    // concatenation — `a`'s start, `b`'s end. Whatever of `a.dangling_end`
    // wasn't consumed by reconciliation is discarded, matching "otherwise
    // the candidate is discarded".
    ChunkState {
        boundaries,
        deltas,
        dangling_start: a.dangling_start,
        dangling_end: b.dangling_end,
        length: a_len + b.length,
    }
}

/// Fold a sequence of chunk states, in input order, with a balanced
/// (tree) reduction. Associative but not commutative — ordering is
/// preserved by construction, matching spec.md §4.4's "Reduce with `⊕`
/// in input order using a balanced (tree) reduction".
pub fn reduce_in_order(states: Vec<ChunkState>, rules: &LanguageRules) -> ChunkState {
    fn go(mut states: Vec<ChunkState>, rules: &LanguageRules) -> ChunkState {
        if states.is_empty() {
            return ChunkState::identity(rules.enclosure_count());
        }
        while states.len() > 1 {
            let mut next = Vec::with_capacity(states.len().div_ceil(2));
            let mut iter = states.into_iter();
            while let Some(a) = iter.next() {
                match iter.next() {
                    Some(b) => next.push(combine(a, b, rules)),
                    None => next.push(a),
                }
            }
            states = next;
        }
        states.into_iter().next().unwrap()
    }
    go(states, rules)
}

/// Incrementally fold one more chunk state onto an accumulator,
/// matching spec.md §4.4 streaming mode's `S ← S ⊕ c`.
pub fn accumulate(acc: ChunkState, next: ChunkState, rules: &LanguageRules) -> ChunkState {
    combine(acc, next, rules)
}

/// Whether `state`'s dangling tail still has unresolved context that
/// could change if more input arrives (streaming mode's flush gate).
pub fn has_unresolved_tail(state: &ChunkState) -> bool {
    state.dangling_end != DanglingEnd::default()
}

/// Resolve a still-pending boundary candidate against true end-of-input
/// (spec.md §4.2 "if `is_last_chunk` is true, all pending candidates
/// are flushed"). Used by streaming mode once the source is exhausted,
/// where the accumulated state's last chunk was necessarily scanned
/// with `is_last_chunk = false` (the reader didn't yet know it was at
/// EOF when that chunk was pulled).
pub fn finalize_tail(mut state: ChunkState, rules: &LanguageRules) -> ChunkState {
    if let Some(pending) = state.dangling_end.pending.take() {
        let compiled = rules.compiled();
        let confirmed = match pending.kind {
            PendingKind::Terminator => true,
            PendingKind::Abbreviation => compiled.confirms_sentence_start(""),
            PendingKind::Ellipsis => compiled.ellipsis_is_boundary(""),
        };
        if confirmed {
            state.boundaries.push(pending.offset);
        }
    }
    state.dangling_end = DanglingEnd::default();
    state
}
