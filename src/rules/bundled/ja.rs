//! Bundled Japanese rule set.

use crate::error::Result;
use crate::rules::types::{
    AbbreviationConfig, EllipsisConfig, EnclosurePair, SuppressionConfig, TerminatorConfig,
};
use crate::rules::LanguageRules;

pub(crate) fn rules() -> Result<LanguageRules> {
    let terminators = TerminatorConfig {
        chars: vec!['。', '！', '？'],
        patterns: Vec::new(),
    };

    let ellipsis = EllipsisConfig {
        patterns: vec!["……".to_string(), "…".to_string()],
        treat_as_boundary: false,
        context_rules: Vec::new(),
        exceptions: Vec::new(),
    };

    let enclosures = vec![
        EnclosurePair::new('「', '」'),
        EnclosurePair::new('『', '』'),
        EnclosurePair::new('（', '）'),
        EnclosurePair::new('【', '】'),
    ];

    LanguageRules::builder("ja", "Japanese")
        .terminators(terminators)
        .ellipsis(ellipsis)
        .enclosures(enclosures)
        .suppression(SuppressionConfig::default())
        .abbreviations(AbbreviationConfig::default())
        .build()
}
