//! The rule-driven character scanner (spec.md §4.2).
//!
//! `scan` walks one chunk of text in a single forward pass over Unicode
//! scalar values and produces a [`ChunkState`] — the monoid element the
//! [`crate::combiner`] reduces across chunks. The scanner never fails
//! on valid Unicode and holds no state beyond what it returns.

pub mod state;

pub use state::{ChunkState, DanglingEnd, DanglingStart, EnclosureDelta, PendingBoundary, PendingKind};

use crate::rules::LanguageRules;

/// Produce a [`ChunkState`] from `chunk`, using `rules` to drive every
/// boundary decision (spec.md §4.2 "Contract").
///
/// `is_first_chunk` / `is_last_chunk` tell the scanner whether it may
/// assume there is no previous/following chunk to reconcile against.
/// When both are `true` this is equivalent to scanning the entire
/// input in one pass.
pub fn scan(chunk: &str, rules: &LanguageRules, is_first_chunk: bool, is_last_chunk: bool) -> ChunkState {
    let compiled = rules.compiled();
    let enclosure_count = compiled.enclosure_count();

    let mut depth = vec![0i64; enclosure_count];
    let mut min_depth = vec![0i64; enclosure_count];
    let mut symmetric_open = vec![false; enclosure_count];

    let mut boundaries: Vec<usize> = Vec::new();
    let mut dangling_start = DanglingStart::default();
    let mut leading_capture_done = is_first_chunk;

    let lookback = compiled.max_pattern_width();
    let mut token_start: Option<usize> = None;
    let mut deferred: Option<PendingBoundary> = None;

    let chars: Vec<(usize, char)> = chunk.char_indices().collect();
    let len = chunk.len();

    let mut i = 0usize;
    while i < chars.len() {
        let (byte_off, c) = chars[i];
        let rest = &chunk[byte_off..];

        if !leading_capture_done {
            // Bounded by `lookback` so a leading stretch with no
            // whitespace (dense CJK text, a long unbroken token) can't
            // grow `dangling_start` unboundedly — spec.md §5's memory
            // discipline applies to every field of the monoid element,
            // not just `dangling_end`.
            if c.is_whitespace() || !boundaries.is_empty() || dangling_start.leading_text.len() >= lookback {
                leading_capture_done = true;
            } else {
                dangling_start.leading_text.push(c);
            }
        }

        let next_char = chars.get(i + 1).map(|&(_, c)| c);

        // A symmetric mark flanked by alphabetic characters on both
        // sides is an apostrophe/contraction ("I'm", "don't"), not a
        // quote opening or closing — skip enclosure handling for it so
        // a lone mid-word `'` doesn't leave a quote depth open for the
        // rest of the chunk. Plain ASCII `'` is the only mark in the
        // bundled rule sets that is overloaded this way.
        let is_contraction_mark = compiled
            .enclosure_id_for_open(c)
            .is_some_and(|id| compiled.enclosures[id].symmetric)
            && i > 0
            && chars[i - 1].1.is_alphabetic()
            && next_char.is_some_and(char::is_alphabetic);

        // 1. enclosures (spec.md §4.2 step 1).
        if !is_contraction_mark {
            if let Some(id) = compiled.enclosure_id_for_open(c) {
                let enc = &compiled.enclosures[id];
                if enc.symmetric {
                    if symmetric_open[id] {
                        depth[id] -= 1;
                        symmetric_open[id] = false;
                    } else {
                        depth[id] += 1;
                        symmetric_open[id] = true;
                    }
                } else {
                    depth[id] += 1;
                }
                min_depth[id] = min_depth[id].min(depth[id]);
                token_start = None;
                i += 1;
                continue;
            }
            if let Some(id) = compiled.enclosure_id_for_close(c) {
                if !compiled.enclosures[id].symmetric {
                    depth[id] -= 1;
                    min_depth[id] = min_depth[id].min(depth[id]);
                    if depth[id] < 0 && dangling_start.opens_with_close.is_none() {
                        dangling_start.opens_with_close = Some(id);
                    }
                    token_start = None;
                    i += 1;
                    continue;
                }
            }
        }

        let inside_enclosure = depth.iter().any(|&d| d > 0);

        // Context known for this position only if there is a next
        // scalar in this chunk, or this chunk is the last one (in
        // which case "no more text" is itself definite context).
        let context_complete = next_char.is_some() || is_last_chunk;

        if !inside_enclosure {
            let prev_char = if i > 0 { Some(chars[i - 1].1) } else { None };

            // 2. suppression — fast-patterns and general-regex vetoes —
            // applies to this position ahead of ellipsis and terminator
            // matching (spec.md §4.2 step 2 runs before steps 3 and 4,
            // for any position, not only single-char terminators).
            let suppressed_by_pattern = match (prev_char, next_char) {
                (Some(p), Some(n)) => compiled.suppressed_by_fast_pattern(
                    c,
                    crate::rules::types::CharClass::of(p),
                    crate::rules::types::CharClass::of(n),
                ),
                _ => false,
            };
            let suppressed = suppressed_by_pattern || {
                // Anchor the window's start to the current token (the
                // same notion abbreviation matching uses) rather than a
                // flat byte lookback, so a regex veto matched against
                // one token's context can't bleed into an unrelated
                // terminator later in the chunk.
                let window_start =
                    token_start.unwrap_or_else(|| floor_char_boundary(chunk, byte_off.saturating_sub(lookback)));
                let window_end = ceil_char_boundary(chunk, (byte_off + c.len_utf8() + lookback).min(len));
                compiled.suppressed_by_regex(&chunk[window_start..window_end])
            };

            if !suppressed {
                // 3. ellipsis (spec.md §4.2 step 3) takes precedence over
                // bare terminators.
                if let Some(pattern) = compiled.match_ellipsis(rest) {
                    let pat_len = pattern.len();
                    let after_byte = byte_off + pat_len;
                    if after_byte == len && !is_last_chunk {
                        deferred = Some(PendingBoundary {
                            kind: PendingKind::Ellipsis,
                            offset: after_byte,
                            token: pattern.to_string(),
                        });
                        token_start = None;
                        break;
                    }
                    let following_text = &chunk[after_byte..];
                    if compiled.ellipsis_is_boundary(following_text) {
                        boundaries.push(after_byte);
                    }
                    token_start = None;
                    i += advance_for(chunk, byte_off, pat_len);
                    continue;
                }

                // 4. multi-char terminator patterns take precedence over
                // the single characters that make them up.
                if let Some(pattern) = compiled.match_terminator_pattern(rest) {
                    let pat_len = pattern.len();
                    let after_byte = byte_off + pat_len;
                    boundaries.push(after_byte);
                    token_start = None;
                    i += advance_for(chunk, byte_off, pat_len);
                    continue;
                }

                // A dot immediately followed by another letter with no
                // separating whitespace — "U.S.A.", "Ph.D" — is interior to
                // a dotted token, not a terminator candidate in its own
                // right (spec.md §4.2 step 4: "the preceding token [is] the
                // maximal alphabetic/dotted run ending at this terminator",
                // which only makes sense if interior dots don't themselves
                // fire boundary decisions). Only the run's final dot, the
                // one actually followed by whitespace/punctuation/EOF, is
                // evaluated below; until then this dot just extends the
                // token like any other alphabetic character.
                let mid_dotted_token = c == '.' && token_start.is_some() && next_char.is_some_and(char::is_alphabetic);

                if compiled.is_terminator_char(c) && !mid_dotted_token {
                    let after_byte = byte_off + c.len_utf8();
                    let token_text = token_start.map(|s| &chunk[s..byte_off]).unwrap_or("");

                    if !context_complete {
                        let kind = if compiled.is_abbreviation(token_text) {
                            PendingKind::Abbreviation
                        } else {
                            PendingKind::Terminator
                        };
                        deferred = Some(PendingBoundary {
                            kind,
                            offset: after_byte,
                            token: token_text.to_string(),
                        });
                        token_start = None;
                        break;
                    }

                    // A terminator immediately followed by a closing
                    // enclosure character is emitted after that close,
                    // not at the terminator itself, when the rules
                    // declare the close boundary-extending (spec.md
                    // §4.2 "Edge cases and tie-breaks"). Symmetric pairs
                    // are excluded here: since we're outside any open
                    // enclosure at this point, the next occurrence of a
                    // symmetric mark necessarily opens it rather than
                    // closing it, so there is no close to extend past.
                    let boundary_offset = match next_char.and_then(|n| compiled.enclosure_id_for_close(n)) {
                        Some(id) if !compiled.enclosures[id].symmetric && compiled.enclosures[id].boundary_extending => {
                            after_byte + next_char.unwrap().len_utf8()
                        }
                        _ => after_byte,
                    };

                    let following_text = &chunk[after_byte..];
                    let abbrev_category = compiled.abbreviation_category(token_text);
                    if let Some(category) = abbrev_category {
                        let is_multi_dot = category == "multi_dot";
                        let confirmed_by_starter = compiled.confirms_sentence_start(following_text);
                        if confirmed_by_starter && !is_multi_dot {
                            boundaries.push(boundary_offset);
                        }
                        // else: suppressed, no boundary.
                    } else {
                        boundaries.push(boundary_offset);
                    }
                    token_start = None;
                    i += 1;
                    continue;
                }
            }
        }

        // token tracking: an abbreviation token is a maximal run of
        // alphabetic characters and internal dots (spec.md §4.2 step 4
        // "the preceding token (the maximal alphabetic/dotted run
        // ending at this terminator)").
        if c.is_alphabetic() || (c == '.' && token_start.is_some()) {
            if token_start.is_none() {
                token_start = Some(byte_off);
            }
        } else {
            token_start = None;
        }

        i += 1;
    }

    let dangling_end = if is_last_chunk {
        DanglingEnd::default()
    } else {
        let trailing_start = deferred
            .as_ref()
            .map(|p| match p.kind {
                PendingKind::Ellipsis => p.offset.saturating_sub(p.token.len()),
                _ => p.offset.saturating_sub(p.token.len() + 1),
            })
            .unwrap_or_else(|| len.saturating_sub(lookback.min(len)));
        DanglingEnd {
            pending: deferred,
            trailing_text: chunk[trailing_start.min(len)..].to_string(),
        }
    };

    ChunkState {
        boundaries,
        deltas: (0..enclosure_count)
            .map(|id| EnclosureDelta {
                min_depth: min_depth[id],
                net_depth: depth[id],
            })
            .collect(),
        dangling_start,
        dangling_end,
        length: len,
    }
}

/// Number of `char_indices` positions consumed by a pattern `pat_len`
/// bytes long, starting at `byte_off` — used to skip the scanner's
/// index cursor past a multi-byte/multi-char match.
fn advance_for(chunk: &str, byte_off: usize, pat_len: usize) -> usize {
    chunk[byte_off..byte_off + pat_len].chars().count()
}

/// Nearest char boundary at or before `index`, used to snap a
/// lookback window start to a valid UTF-8 slice point.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Nearest char boundary at or after `index`, used to snap a lookahead
/// window end to a valid UTF-8 slice point.
fn ceil_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
