//! Validation pass run once at `LanguageRules::load` / `build` time
//! (spec.md §4.1 "Fails with `ConfigError{reason}` if...").

use std::collections::HashSet;

use regex::Regex;

use crate::error::{Result, SbdError};

use super::types::LanguageRulesDocument;

fn config_error(reason: impl Into<String>) -> SbdError {
    SbdError::ConfigError {
        reason: reason.into(),
    }
}

/// Validate a document's internal consistency before compiling it.
/// Returns the compiled ellipsis exception / suppression regex sets
/// so the compile step doesn't need to recompile them.
pub(crate) struct ValidatedPatterns {
    pub ellipsis_exceptions: Vec<Regex>,
    pub suppression_regex: Vec<Regex>,
}

pub(crate) fn validate(doc: &LanguageRulesDocument) -> Result<ValidatedPatterns> {
    if doc.metadata.code.trim().is_empty() {
        return Err(config_error("metadata.code must not be empty"));
    }

    if doc.terminators.chars.is_empty() && doc.terminators.patterns.is_empty() {
        return Err(config_error(
            "terminators must declare at least one char or pattern",
        ));
    }

    // Enclosure pairs: open == close is only sensible when symmetric,
    // and every pair must land on a distinct id (guaranteed by being
    // assigned from position, but we still reject literal duplicates
    // since they'd make depth bookkeeping ambiguous).
    let mut seen_opens: HashSet<char> = HashSet::new();
    for (idx, pair) in doc.enclosures.pairs.iter().enumerate() {
        if pair.open == pair.close && !pair.symmetric {
            return Err(config_error(format!(
                "enclosure pair #{idx} has identical open/close '{}' but is not marked symmetric",
                pair.open
            )));
        }
        if !seen_opens.insert(pair.open) {
            return Err(config_error(format!(
                "enclosure open character '{}' is declared more than once",
                pair.open
            )));
        }
    }

    // Abbreviations contain no whitespace.
    for (category, cat_cfg) in &doc.abbreviations.categories {
        for token in &cat_cfg.tokens {
            if token.chars().any(char::is_whitespace) {
                return Err(config_error(format!(
                    "abbreviation token '{token}' in category '{category}' contains whitespace"
                )));
            }
        }
    }

    // treat_as_boundary / context_rules consistency: every condition
    // name must be one this crate understands.
    for rule in &doc.ellipsis.context_rules {
        if super::compiled::EllipsisCondition::parse(&rule.condition).is_none() {
            return Err(config_error(format!(
                "unknown ellipsis context condition '{}'",
                rule.condition
            )));
        }
    }

    let ellipsis_exceptions = doc
        .ellipsis
        .exceptions
        .iter()
        .map(|pat| Regex::new(pat).map_err(|e| config_error(format!("invalid ellipsis exception regex '{pat}': {e}"))))
        .collect::<Result<Vec<_>>>()?;

    let suppression_regex = doc
        .suppression
        .regex_patterns
        .iter()
        .map(|pat| Regex::new(pat).map_err(|e| config_error(format!("invalid suppression regex '{pat}': {e}"))))
        .collect::<Result<Vec<_>>>()?;

    Ok(ValidatedPatterns {
        ellipsis_exceptions,
        suppression_regex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::types::{EnclosurePair, EllipsisContextRule, MetadataConfig};

    fn minimal_doc() -> LanguageRulesDocument {
        LanguageRulesDocument {
            metadata: MetadataConfig::new("en", "English"),
            terminators: super::super::types::TerminatorConfig::new(vec!['.', '!', '?']),
            ellipsis: Default::default(),
            enclosures: Default::default(),
            suppression: Default::default(),
            abbreviations: Default::default(),
            sentence_starters: None,
        }
    }

    #[test]
    fn accepts_minimal_document() {
        assert!(validate(&minimal_doc()).is_ok());
    }

    #[test]
    fn rejects_empty_language_code() {
        let mut doc = minimal_doc();
        doc.metadata.code = "  ".to_string();
        assert!(matches!(validate(&doc), Err(SbdError::ConfigError { .. })));
    }

    #[test]
    fn rejects_no_terminators() {
        let mut doc = minimal_doc();
        doc.terminators.chars.clear();
        assert!(matches!(validate(&doc), Err(SbdError::ConfigError { .. })));
    }

    #[test]
    fn rejects_unmarked_symmetric_pair() {
        let mut doc = minimal_doc();
        doc.enclosures.pairs.push(EnclosurePair::new('"', '"'));
        assert!(matches!(validate(&doc), Err(SbdError::ConfigError { .. })));
    }

    #[test]
    fn rejects_duplicate_enclosure_open() {
        let mut doc = minimal_doc();
        doc.enclosures.pairs.push(EnclosurePair::new('(', ')'));
        doc.enclosures.pairs.push(EnclosurePair::new('(', ']'));
        assert!(matches!(validate(&doc), Err(SbdError::ConfigError { .. })));
    }

    #[test]
    fn rejects_whitespace_in_abbreviation_token() {
        let mut doc = minimal_doc();
        doc.abbreviations = doc.abbreviations.with_category("bad", vec!["a b".to_string()]);
        assert!(matches!(validate(&doc), Err(SbdError::ConfigError { .. })));
    }

    #[test]
    fn rejects_unknown_ellipsis_condition() {
        let mut doc = minimal_doc();
        doc.ellipsis.context_rules.push(EllipsisContextRule::new("nonsense", true));
        assert!(matches!(validate(&doc), Err(SbdError::ConfigError { .. })));
    }

    #[test]
    fn rejects_invalid_regex() {
        let mut doc = minimal_doc();
        doc.ellipsis.exceptions.push("(unclosed".to_string());
        assert!(matches!(validate(&doc), Err(SbdError::ConfigError { .. })));
    }
}
