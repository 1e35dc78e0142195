//! `LanguageRules` — the immutable, validated, shareable bundle that
//! parameterises the scanner (spec.md §3.1, §4.1).

pub mod bundled;
pub mod builder;
pub(crate) mod compiled;
pub(crate) mod validate;
pub mod types;

use std::sync::Arc;

use crate::error::Result;

pub use builder::LanguageRulesBuilder;
pub use compiled::EnclosureDef;
pub use types::*;

use compiled::CompiledRules;

/// An immutable, validated rule set. Cheap to clone (wraps an `Arc`
/// internally is not required — the struct itself holds no interior
/// mutability, so callers are expected to share it behind their own
/// `Arc`, matching the teacher's `Arc<dyn Chunker>` sharing pattern in
/// `router`).
pub struct LanguageRules {
    compiled: CompiledRules,
}

impl LanguageRules {
    /// Load and validate a declarative document (spec.md §4.1).
    pub fn from_document(doc: LanguageRulesDocument) -> Result<Self> {
        let validated = validate::validate(&doc)?;
        let compiled = CompiledRules::compile(&doc, validated.ellipsis_exceptions, validated.suppression_regex);
        Ok(Self { compiled })
    }

    /// Parse and load a TOML-shaped document (spec.md §6 "persisted
    /// form").
    pub fn from_toml_str(toml_src: &str) -> Result<Self> {
        let doc: LanguageRulesDocument = toml::from_str(toml_src).map_err(|e| {
            crate::error::SbdError::ConfigError {
                reason: format!("failed to parse language rules document: {e}"),
            }
        })?;
        Self::from_document(doc)
    }

    /// Load a TOML-shaped document from a file path.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let src = std::fs::read_to_string(path.as_ref()).map_err(|e| crate::error::SbdError::InputError(e.to_string()))?;
        Self::from_toml_str(&src)
    }

    /// Start a programmatic builder (spec.md §4.1 "or a programmatic
    /// builder").
    pub fn builder(code: impl Into<String>, name: impl Into<String>) -> LanguageRulesBuilder {
        LanguageRulesBuilder::new(code, name)
    }

    pub fn code(&self) -> &str {
        &self.compiled.code
    }

    pub fn name(&self) -> &str {
        &self.compiled.name
    }

    pub(crate) fn compiled(&self) -> &CompiledRules {
        &self.compiled
    }

    /// Number of distinct enclosure pairs, i.e. the width of a
    /// `ChunkState`'s `deltas` vector.
    pub fn enclosure_count(&self) -> usize {
        self.compiled.enclosure_count()
    }
}

/// Look up a bundled `LanguageRules` by name and wrap it in an `Arc`
/// for cheap sharing across the API surface.
pub fn arc(rules: LanguageRules) -> Arc<LanguageRules> {
    Arc::new(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_TOML: &str = r#"
        [metadata]
        code = "xx"
        name = "Test Language"

        [terminators]
        chars = [".", "!", "?"]
    "#;

    #[test]
    fn loads_a_minimal_toml_document() {
        let rules = LanguageRules::from_toml_str(MINIMAL_TOML).unwrap();
        assert_eq!(rules.code(), "xx");
        assert_eq!(rules.name(), "Test Language");
        assert_eq!(rules.enclosure_count(), 0);
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = LanguageRules::from_toml_str("not valid toml [[[").unwrap_err();
        assert!(matches!(err, crate::error::SbdError::ConfigError { .. }));
    }

    #[test]
    fn builder_produces_a_working_rule_set() {
        let rules = LanguageRules::builder("xx", "Test Language")
            .terminators(TerminatorConfig::new(vec!['.']))
            .enclosures(vec![EnclosurePair::new('(', ')')])
            .build()
            .unwrap();
        assert_eq!(rules.enclosure_count(), 1);

        let state = crate::scanner::scan("One. Two.", &rules, true, true);
        assert_eq!(state.boundaries, vec![4, 9]);
    }

    #[test]
    fn builder_surfaces_validation_errors() {
        let err = LanguageRulesBuilder::new("xx", "Test").build().unwrap_err();
        assert!(matches!(err, crate::error::SbdError::ConfigError { .. }));
    }
}
