//! Sequential execution mode (spec.md §4.4 "Sequential mode"): one
//! `scan` over the whole input, no `Combiner` needed.

use std::sync::Arc;

use crate::rules::LanguageRules;
use crate::scanner::{self, ChunkState};

pub fn run(text: &str, rules: &Arc<LanguageRules>) -> ChunkState {
    scanner::scan(text, rules, true, true)
}
