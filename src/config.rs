//! Options accepted by the segmentation API (spec.md §6).

use std::sync::Arc;

use crate::error::{Result, SbdError};
use crate::input::Encoding;
use crate::rules::LanguageRules;

/// Default advisory chunk size for parallel mode, in KiB.
pub const DEFAULT_CHUNK_KB: usize = 64;

/// Default streaming buffer target, in MiB.
pub const DEFAULT_STREAM_CHUNK_MB: usize = 4;

/// Input size at or below which sequential mode is used regardless of
/// `execution_mode: Adaptive`.
pub const DEFAULT_SEQUENTIAL_THRESHOLD: usize = 32 * 1024;

/// Input size above which adaptive mode falls back to streaming
/// instead of materialised parallel execution.
pub const DEFAULT_PARALLEL_CEILING: usize = 64 * 1024 * 1024;

/// Execution strategy requested by the caller (spec.md §4.4, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One `scan` over the whole input.
    Sequential,
    /// Split into chunks, scan on a worker pool, reduce with `⊕`.
    Parallel,
    /// Bounded-memory incremental processing.
    Streaming,
    /// Pick sequential, parallel, or streaming by input size and
    /// source kind (spec.md §4.4 "Mode selection").
    #[default]
    Adaptive,
}

impl ExecutionMode {
    /// Parse the execution mode names accepted at the API boundary.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "sequential" => Some(ExecutionMode::Sequential),
            "parallel" => Some(ExecutionMode::Parallel),
            "streaming" => Some(ExecutionMode::Streaming),
            "adaptive" => Some(ExecutionMode::Adaptive),
            _ => None,
        }
    }
}

/// Options controlling language selection, execution strategy, and
/// output shape for `split`/`iter_split`.
#[derive(Clone)]
pub struct SplitOptions {
    /// Named bundled language (e.g. `"en"`). Ignored if
    /// `language_config` is set.
    pub language: String,

    /// Explicit rule set; overrides `language` when present.
    pub language_config: Option<Arc<LanguageRules>>,

    /// Requested execution strategy.
    pub execution_mode: ExecutionMode,

    /// Worker count for parallel mode. `None` means "auto" (rayon's
    /// default, the host's logical CPU count).
    pub threads: Option<usize>,

    /// Advisory chunk size for parallel mode, in KiB.
    pub chunk_kb: usize,

    /// Streaming buffer target, in MiB.
    pub stream_chunk_mb: usize,

    /// Trim leading/trailing whitespace from each sentence's `text`
    /// while keeping `start`/`end` spanning the raw slice.
    pub preserve_whitespace: bool,

    /// Declared encoding for `Input::Bytes` without its own encoding,
    /// and the default used when constructing `Input` from raw bytes
    /// via bindings.
    pub encoding: Encoding,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            language_config: None,
            execution_mode: ExecutionMode::Adaptive,
            threads: None,
            chunk_kb: DEFAULT_CHUNK_KB,
            stream_chunk_mb: DEFAULT_STREAM_CHUNK_MB,
            preserve_whitespace: false,
            encoding: Encoding::Utf8,
        }
    }
}

impl SplitOptions {
    /// Start from defaults for the given bundled language.
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Default::default()
        }
    }

    /// Override defaults from environment variables, the way the
    /// teacher's `ChunkingConfig::from_env` reads `CHUNK_SIZE` et al.
    /// Unset or unparsable variables keep the struct default.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Ok(v) = std::env::var("SBD_LANGUAGE") {
            opts.language = v;
        }
        if let Ok(v) = std::env::var("SBD_EXECUTION_MODE") {
            if let Some(mode) = ExecutionMode::parse(&v) {
                opts.execution_mode = mode;
            }
        }
        if let Ok(v) = std::env::var("SBD_THREADS") {
            if let Ok(n) = v.parse::<usize>() {
                opts.threads = Some(n);
            }
        }
        if let Ok(v) = std::env::var("SBD_CHUNK_KB") {
            if let Ok(n) = v.parse::<usize>() {
                opts.chunk_kb = n;
            }
        }
        if let Ok(v) = std::env::var("SBD_STREAM_CHUNK_MB") {
            if let Ok(n) = v.parse::<usize>() {
                opts.stream_chunk_mb = n;
            }
        }
        opts
    }

    pub fn with_execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = mode;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_chunk_kb(mut self, chunk_kb: usize) -> Self {
        self.chunk_kb = chunk_kb;
        self
    }

    pub fn with_language_config(mut self, rules: Arc<LanguageRules>) -> Self {
        self.language_config = Some(rules);
        self
    }

    pub fn with_preserve_whitespace(mut self, preserve: bool) -> Self {
        self.preserve_whitespace = preserve;
        self
    }

    /// Validate numeric domains before any scanning begins (spec.md
    /// §6: "Invalid numeric types ... zero/negative counts ...
    /// unknown execution mode ... yield `ConfigError` before any
    /// scanning begins").
    pub fn validate(&self) -> Result<()> {
        if self.chunk_kb == 0 {
            return Err(SbdError::ConfigError {
                reason: "chunk_kb must be a positive integer".to_string(),
            });
        }
        if self.stream_chunk_mb == 0 {
            return Err(SbdError::ConfigError {
                reason: "stream_chunk_mb must be a positive integer".to_string(),
            });
        }
        if let Some(0) = self.threads {
            return Err(SbdError::ConfigError {
                reason: "threads must be a positive integer".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve the `LanguageRules` to use: the explicit override, or
    /// the bundled rule set named by `language`.
    pub fn resolve_rules(&self) -> Result<Arc<LanguageRules>> {
        if let Some(rules) = &self.language_config {
            return Ok(Arc::clone(rules));
        }
        crate::rules::bundled::lookup(&self.language)
            .ok_or_else(|| SbdError::UnsupportedLanguage(self.language.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_adaptive_english() {
        let opts = SplitOptions::default();
        assert_eq!(opts.language, "en");
        assert_eq!(opts.execution_mode, ExecutionMode::Adaptive);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn rejects_zero_chunk_kb() {
        let opts = SplitOptions {
            chunk_kb: 0,
            ..SplitOptions::default()
        };
        assert!(matches!(opts.validate(), Err(SbdError::ConfigError { .. })));
    }

    #[test]
    fn rejects_zero_stream_chunk_mb() {
        let opts = SplitOptions {
            stream_chunk_mb: 0,
            ..SplitOptions::default()
        };
        assert!(matches!(opts.validate(), Err(SbdError::ConfigError { .. })));
    }

    #[test]
    fn rejects_zero_threads() {
        let opts = SplitOptions {
            threads: Some(0),
            ..SplitOptions::default()
        };
        assert!(matches!(opts.validate(), Err(SbdError::ConfigError { .. })));
    }

    #[test]
    fn unknown_language_resolves_to_unsupported_language_error() {
        let opts = SplitOptions::for_language("not-a-real-language");
        assert!(matches!(opts.resolve_rules(), Err(SbdError::UnsupportedLanguage(_))));
    }

    #[test]
    fn execution_mode_parses_known_names_only() {
        assert_eq!(ExecutionMode::parse("sequential"), Some(ExecutionMode::Sequential));
        assert_eq!(ExecutionMode::parse("adaptive"), Some(ExecutionMode::Adaptive));
        assert_eq!(ExecutionMode::parse("quantum"), None);
    }

    #[test]
    fn from_env_ignores_unset_and_unparsable_vars() {
        std::env::remove_var("SBD_THREADS");
        std::env::remove_var("SBD_CHUNK_KB");
        let opts = SplitOptions::from_env();
        assert_eq!(opts.threads, None);
        assert_eq!(opts.chunk_kb, DEFAULT_CHUNK_KB);
    }
}
