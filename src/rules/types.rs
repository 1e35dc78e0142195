//! The persisted, declarative shape of a `LanguageRules` document
//! (spec.md §3.1, §6). Field names and nesting are part of the
//! persisted contract — a document written for one implementation
//! must load in another — so these structs double as the TOML/JSON
//! schema via `serde`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level document accepted by `LanguageRules::load`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageRulesDocument {
    pub metadata: MetadataConfig,
    pub terminators: TerminatorConfig,
    #[serde(default)]
    pub ellipsis: EllipsisConfig,
    #[serde(default)]
    pub enclosures: EnclosureConfig,
    #[serde(default)]
    pub suppression: SuppressionConfig,
    #[serde(default)]
    pub abbreviations: AbbreviationConfig,
    #[serde(default)]
    pub sentence_starters: Option<SentenceStarterConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub code: String,
    pub name: String,
}

impl MetadataConfig {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Single-character terminators plus multi-char patterns (spec.md
/// §3.1).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminatorConfig {
    pub chars: Vec<char>,
    #[serde(default)]
    pub patterns: Vec<TerminatorPattern>,
}

impl TerminatorConfig {
    pub fn new(chars: Vec<char>) -> Self {
        Self {
            chars,
            patterns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminatorPattern {
    pub pattern: String,
    pub name: String,
}

impl TerminatorPattern {
    pub fn new(pattern: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            name: name.into(),
        }
    }
}

/// Ellipsis recognition rules (spec.md §3.1, §4.2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EllipsisConfig {
    pub patterns: Vec<String>,
    pub treat_as_boundary: bool,
    #[serde(default)]
    pub context_rules: Vec<EllipsisContextRule>,
    #[serde(default)]
    pub exceptions: Vec<String>,
}

impl Default for EllipsisConfig {
    fn default() -> Self {
        Self {
            patterns: vec!["...".to_string(), "…".to_string()],
            treat_as_boundary: false,
            context_rules: Vec::new(),
            exceptions: Vec::new(),
        }
    }
}

/// An override of `treat_as_boundary` keyed on a predicate about the
/// text following the ellipsis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EllipsisContextRule {
    pub condition: String,
    pub boundary: bool,
}

impl EllipsisContextRule {
    pub fn new(condition: impl Into<String>, boundary: bool) -> Self {
        Self {
            condition: condition.into(),
            boundary,
        }
    }
}

/// Ordered list of enclosure pairs (spec.md §3.1).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnclosureConfig {
    pub pairs: Vec<EnclosurePair>,
}

impl EnclosureConfig {
    pub fn new(pairs: Vec<EnclosurePair>) -> Self {
        Self { pairs }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnclosurePair {
    pub open: char,
    pub close: char,
    #[serde(default)]
    pub symmetric: bool,
    /// Whether a terminator immediately preceding this pair's close is
    /// emitted *after* the close rather than at the terminator
    /// (spec.md §4.2 edge case). Defaults to `symmetric` when unset,
    /// matching the spec's "default is boundary-extending for
    /// symmetric quotes".
    #[serde(default)]
    pub boundary_extending: Option<bool>,
}

impl EnclosurePair {
    pub fn new(open: char, close: char) -> Self {
        Self {
            open,
            close,
            symmetric: false,
            boundary_extending: None,
        }
    }

    pub fn symmetric(ch: char) -> Self {
        Self {
            open: ch,
            close: ch,
            symmetric: true,
            boundary_extending: None,
        }
    }

    pub fn is_boundary_extending(&self) -> bool {
        self.boundary_extending.unwrap_or(self.symmetric)
    }
}

/// Boundary-suppression patterns (spec.md §3.1, §4.2 step 2).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuppressionConfig {
    #[serde(default)]
    pub fast_patterns: Vec<FastPattern>,
    #[serde(default)]
    pub regex_patterns: Vec<String>,
}

/// Character class used by `FastPattern` and the scanner's lookaround.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Digit,
    Alpha,
    Space,
    Punct,
    Other,
}

impl CharClass {
    pub fn of(c: char) -> Self {
        if c.is_ascii_digit() || c.is_numeric() {
            CharClass::Digit
        } else if c.is_alphabetic() {
            CharClass::Alpha
        } else if c.is_whitespace() {
            CharClass::Space
        } else if c.is_ascii_punctuation() {
            CharClass::Punct
        } else {
            CharClass::Other
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastPattern {
    pub char: char,
    pub before: CharClass,
    pub after: CharClass,
}

impl FastPattern {
    pub fn new(char: char, before: CharClass, after: CharClass) -> Self {
        Self { char, before, after }
    }
}

/// Category → token set. A category name mapping to `true` in
/// `case_insensitive` is matched case-insensitively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbbreviationConfig {
    #[serde(flatten)]
    pub categories: HashMap<String, AbbreviationCategory>,
}

impl AbbreviationConfig {
    pub fn with_category(mut self, name: impl Into<String>, tokens: Vec<String>) -> Self {
        self.categories.insert(
            name.into(),
            AbbreviationCategory {
                tokens,
                case_insensitive: false,
            },
        );
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbbreviationCategory {
    pub tokens: Vec<String>,
    #[serde(default)]
    pub case_insensitive: bool,
}

/// Optional hints confirming that a borderline terminator is really a
/// boundary (spec.md §3.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceStarterConfig {
    #[serde(default)]
    pub require_following_space: bool,
    #[serde(default)]
    pub min_word_length: usize,
    #[serde(default)]
    pub categories: HashMap<String, Vec<String>>,
}
