//! sbd-core
//!
//! A parallel, associative sentence boundary detection engine. Text is
//! reduced to sentence spans through a small algebraic structure (a
//! per-chunk scan producing a combinable state, reduced left-to-right
//! with an associative operator) so the same rules produce identical
//! output whether the input is scanned in one pass, split across a
//! worker pool, or pulled incrementally from a stream.

pub mod api;
pub mod combiner;
pub mod config;
pub mod error;
pub mod executor;
pub mod input;
pub mod rules;
pub mod scanner;
pub mod sentence;

pub use api::{iter_split, iter_split_cancellable, split, split_cancellable};
pub use config::{ExecutionMode, SplitOptions};
pub use error::{Result, SbdError};
pub use executor::CancellationToken;
pub use input::{Encoding, Input};
pub use rules::{LanguageRules, LanguageRulesBuilder};
pub use sentence::Sentence;

/// Re-export of the commonly used types for a `use sbd_core::prelude::*`
/// import.
pub mod prelude {
    pub use crate::api::{iter_split, split};
    pub use crate::config::{ExecutionMode, SplitOptions};
    pub use crate::error::{Result, SbdError};
    pub use crate::input::{Encoding, Input};
    pub use crate::rules::LanguageRules;
    pub use crate::sentence::Sentence;
}
