//! The error taxonomy surfaced by this crate.
//!
//! Every fallible public entry point returns `Result<T, SbdError>`. The
//! core never swallows an error — callers always see one of the
//! variants below, never a panic, for any input that isn't a crate bug.

use thiserror::Error;

/// Errors produced by rule loading, input decoding, and execution.
#[derive(Debug, Error)]
pub enum SbdError {
    /// A `LanguageRules` document or builder failed validation, or a
    /// `SplitOptions` field was outside its valid domain.
    #[error("invalid configuration: {reason}")]
    ConfigError {
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// `SplitOptions::language` named a language with no bundled rule
    /// set and no `language_config` override was given.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Declared-encoding bytes could not be decoded.
    #[error("failed to decode input as {encoding} at byte offset {byte_offset}")]
    DecodeError {
        /// The encoding label that was attempted.
        encoding: String,
        /// Byte offset of the first invalid sequence.
        byte_offset: usize,
    },

    /// The input source itself could not be read (missing file,
    /// broken pipe, permission denied, ...).
    #[error("input error: {0}")]
    InputError(String),

    /// The caller's cancellation token fired before the operation
    /// completed. No sentences are emitted for a cancelled call beyond
    /// what `iter_split` had already yielded.
    #[error("operation cancelled")]
    Cancelled,

    /// Reserved for defects in this crate. Should never surface for a
    /// valid input, valid rules, and valid options.
    #[error("internal error: {0}")]
    InternalError(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SbdError>;
