//! Programmatic construction of a `LanguageRulesDocument`, mirroring
//! the section-object shape the original Python bindings expose
//! (`examples/original_source/.../custom_language.py`:
//! `sakurs.LanguageConfig(metadata=..., terminators=..., ...)`).
//! Lets a caller build rules without round-tripping through TOML.

use super::types::{
    AbbreviationConfig, EllipsisConfig, EnclosureConfig, EnclosurePair, LanguageRulesDocument,
    MetadataConfig, SentenceStarterConfig, SuppressionConfig, TerminatorConfig,
};
use super::LanguageRules;
use crate::error::Result;

/// Builds a `LanguageRulesDocument` section by section, then compiles
/// it with the same validation `LanguageRules::load` applies to a
/// persisted document.
#[derive(Debug, Clone)]
pub struct LanguageRulesBuilder {
    metadata: MetadataConfig,
    terminators: TerminatorConfig,
    ellipsis: EllipsisConfig,
    enclosures: EnclosureConfig,
    suppression: SuppressionConfig,
    abbreviations: AbbreviationConfig,
    sentence_starters: Option<SentenceStarterConfig>,
}

impl LanguageRulesBuilder {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: MetadataConfig::new(code, name),
            terminators: TerminatorConfig::default(),
            ellipsis: EllipsisConfig {
                patterns: Vec::new(),
                treat_as_boundary: false,
                context_rules: Vec::new(),
                exceptions: Vec::new(),
            },
            enclosures: EnclosureConfig::default(),
            suppression: SuppressionConfig::default(),
            abbreviations: AbbreviationConfig::default(),
            sentence_starters: None,
        }
    }

    pub fn terminators(mut self, terminators: TerminatorConfig) -> Self {
        self.terminators = terminators;
        self
    }

    pub fn ellipsis(mut self, ellipsis: EllipsisConfig) -> Self {
        self.ellipsis = ellipsis;
        self
    }

    pub fn enclosures(mut self, enclosures: Vec<EnclosurePair>) -> Self {
        self.enclosures = EnclosureConfig::new(enclosures);
        self
    }

    pub fn suppression(mut self, suppression: SuppressionConfig) -> Self {
        self.suppression = suppression;
        self
    }

    pub fn abbreviations(mut self, abbreviations: AbbreviationConfig) -> Self {
        self.abbreviations = abbreviations;
        self
    }

    pub fn sentence_starters(mut self, starters: SentenceStarterConfig) -> Self {
        self.sentence_starters = Some(starters);
        self
    }

    pub fn document(self) -> LanguageRulesDocument {
        LanguageRulesDocument {
            metadata: self.metadata,
            terminators: self.terminators,
            ellipsis: self.ellipsis,
            enclosures: self.enclosures,
            suppression: self.suppression,
            abbreviations: self.abbreviations,
            sentence_starters: self.sentence_starters,
        }
    }

    /// Validate and compile into an immutable, shareable `LanguageRules`.
    pub fn build(self) -> Result<LanguageRules> {
        LanguageRules::from_document(self.document())
    }
}
