//! Bundled English rule set.

use crate::error::Result;
use crate::rules::types::{
    AbbreviationConfig, EllipsisConfig, EnclosurePair, FastPattern, SentenceStarterConfig,
    SuppressionConfig, TerminatorConfig, TerminatorPattern,
};
use crate::rules::types::CharClass;
use crate::rules::LanguageRules;

pub(crate) fn rules() -> Result<LanguageRules> {
    let terminators = TerminatorConfig {
        chars: vec!['.', '!', '?'],
        patterns: vec![
            TerminatorPattern::new("?!", "interrobang"),
            TerminatorPattern::new("!?", "interrobang"),
        ],
    };

    let ellipsis = EllipsisConfig {
        patterns: vec!["...".to_string(), "…".to_string()],
        treat_as_boundary: false,
        context_rules: vec![crate::rules::types::EllipsisContextRule::new(
            "followed_by_capital",
            true,
        )],
        exceptions: vec![r"^\s*(um|uh|well|so)\b".to_string()],
    };

    let enclosures = vec![
        EnclosurePair::new('(', ')'),
        EnclosurePair::new('[', ']'),
        EnclosurePair::new('{', '}'),
        EnclosurePair::symmetric('"'),
        EnclosurePair::symmetric('\''),
    ];

    let suppression = SuppressionConfig {
        fast_patterns: vec![
            FastPattern::new('.', CharClass::Digit, CharClass::Digit),
            FastPattern::new('.', CharClass::Alpha, CharClass::Digit),
        ],
        regex_patterns: Vec::new(),
    };

    let abbreviations = AbbreviationConfig::default()
        .with_category(
            "titles",
            vec![
                "Dr", "Mr", "Mrs", "Ms", "Prof", "Sr", "Jr", "St", "Rev", "Gen", "Sen", "Rep",
                "Gov", "Capt", "Lt", "Col", "Maj", "Fr", "Hon",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
        .with_category(
            "multi_dot",
            vec!["U.S.A", "U.K", "U.S", "U.N", "E.U", "Ph.D", "M.D", "B.A", "M.A", "D.C"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
        .with_category(
            "common",
            vec!["etc", "vs", "e.g", "i.e", "cf", "al", "approx", "no", "vol", "Inc", "Corp", "Co", "Ltd"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
        .with_category(
            "units",
            vec!["mg", "ml", "cc", "kg", "cm", "mm", "oz", "lb", "ft", "in"]
                .into_iter()
                .map(String::from)
                .collect(),
        );

    let sentence_starters = SentenceStarterConfig {
        require_following_space: true,
        min_word_length: 1,
        categories: [
            (
                "pronouns".to_string(),
                vec!["I", "He", "She", "It", "They", "We", "You"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            (
                "articles".to_string(),
                vec!["The", "A", "An", "This", "That", "These", "Those"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
        ]
        .into_iter()
        .collect(),
    };

    LanguageRules::builder("en", "English")
        .terminators(terminators)
        .ellipsis(ellipsis)
        .enclosures(enclosures)
        .suppression(suppression)
        .abbreviations(abbreviations)
        .sentence_starters(sentence_starters)
        .build()
}
