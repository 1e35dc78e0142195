//! Compiled lookup structures produced from a `LanguageRulesDocument`
//! (spec.md §4.1 "Compiled artefacts"). These are what the scanner's
//! hot loop actually touches — no regex evaluation or hash lookups
//! through category names at scan time beyond what is listed here.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use super::types::{CharClass, LanguageRulesDocument};

/// A condition predicate over the text following an ellipsis,
/// evaluated against a small lookahead window (spec.md §3.1
/// `ellipsis.context_rules`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EllipsisCondition {
    FollowedByCapital,
    FollowedByLowercase,
    FollowedByDigit,
    FollowedByWhitespace,
    EndOfText,
}

impl EllipsisCondition {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "followed_by_capital" => Some(Self::FollowedByCapital),
            "followed_by_lowercase" => Some(Self::FollowedByLowercase),
            "followed_by_digit" => Some(Self::FollowedByDigit),
            "followed_by_whitespace" => Some(Self::FollowedByWhitespace),
            "end_of_text" => Some(Self::EndOfText),
            _ => None,
        }
    }

    /// Evaluate the condition against the text following the pattern.
    /// `Whitespace`/`EndOfText` look at the very next scalar value;
    /// `Capital`/`Lowercase`/`Digit` skip separating whitespace first,
    /// so "...  What" matches `followed_by_capital` the same way
    /// "...What" would.
    pub fn matches_text(&self, following_text: &str) -> bool {
        match self {
            Self::FollowedByWhitespace => following_text.chars().next().is_some_and(char::is_whitespace),
            Self::EndOfText => following_text.is_empty(),
            Self::FollowedByCapital => following_text.trim_start().chars().next().is_some_and(char::is_uppercase),
            Self::FollowedByLowercase => following_text.trim_start().chars().next().is_some_and(char::is_lowercase),
            Self::FollowedByDigit => following_text
                .trim_start()
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit() || c.is_numeric()),
        }
    }
}

/// Compiled enclosure definition with an assigned dense id.
#[derive(Debug, Clone)]
pub struct EnclosureDef {
    pub id: usize,
    pub open: char,
    pub close: char,
    pub symmetric: bool,
    pub boundary_extending: bool,
}

/// Compiled abbreviation category.
#[derive(Debug, Clone)]
pub struct AbbreviationSet {
    pub case_insensitive: bool,
    pub tokens: HashSet<String>,
}

impl AbbreviationSet {
    fn contains(&self, token: &str) -> bool {
        if self.case_insensitive {
            let lower = token.to_lowercase();
            self.tokens.iter().any(|t| t.to_lowercase() == lower)
        } else {
            self.tokens.contains(token)
        }
    }
}

/// Compiled sentence-starter confirmation set.
#[derive(Debug, Clone)]
pub struct CompiledStarters {
    pub require_following_space: bool,
    pub min_word_length: usize,
    pub words: HashSet<String>,
}

/// The fully compiled, immutable artefacts backing a `LanguageRules`
/// instance. Shareable across threads without locking (spec.md §4.1).
pub struct CompiledRules {
    pub code: String,
    pub name: String,

    terminator_chars: HashSet<char>,
    /// Multi-char terminator patterns, longest-first so the scanner's
    /// greedy match picks the longest one (spec.md §4.2 "Multi-char
    /// terminator patterns take precedence").
    terminator_patterns: Vec<(String, String)>,

    ellipsis_patterns: Vec<String>,
    ellipsis_treat_as_boundary: bool,
    ellipsis_context_rules: Vec<(EllipsisCondition, bool)>,
    ellipsis_exceptions: Vec<Regex>,

    pub enclosures: Vec<EnclosureDef>,
    open_to_id: HashMap<char, usize>,
    close_to_id: HashMap<char, usize>,

    suppression_fast: Vec<(char, CharClass, CharClass)>,
    suppression_regex: Vec<Regex>,

    abbreviations: Vec<(String, AbbreviationSet)>,

    pub sentence_starters: Option<CompiledStarters>,
}

impl CompiledRules {
    pub(crate) fn compile(
        doc: &LanguageRulesDocument,
        ellipsis_exceptions: Vec<Regex>,
        suppression_regex: Vec<Regex>,
    ) -> Self {
        let terminator_chars: HashSet<char> = doc.terminators.chars.iter().copied().collect();

        let mut terminator_patterns: Vec<(String, String)> = doc
            .terminators
            .patterns
            .iter()
            .map(|p| (p.pattern.clone(), p.name.clone()))
            .collect();
        terminator_patterns.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut ellipsis_patterns = doc.ellipsis.patterns.clone();
        ellipsis_patterns.sort_by(|a, b| b.len().cmp(&a.len()));

        let ellipsis_context_rules = doc
            .ellipsis
            .context_rules
            .iter()
            .filter_map(|r| EllipsisCondition::parse(&r.condition).map(|c| (c, r.boundary)))
            .collect();

        let mut enclosures = Vec::with_capacity(doc.enclosures.pairs.len());
        let mut open_to_id = HashMap::new();
        let mut close_to_id = HashMap::new();
        for (id, pair) in doc.enclosures.pairs.iter().enumerate() {
            enclosures.push(EnclosureDef {
                id,
                open: pair.open,
                close: pair.close,
                symmetric: pair.symmetric,
                boundary_extending: pair.is_boundary_extending(),
            });
            open_to_id.insert(pair.open, id);
            close_to_id.insert(pair.close, id);
        }

        let suppression_fast = doc
            .suppression
            .fast_patterns
            .iter()
            .map(|p| (p.char, p.before, p.after))
            .collect();

        let abbreviations = doc
            .abbreviations
            .categories
            .iter()
            .map(|(name, cat)| {
                (
                    name.clone(),
                    AbbreviationSet {
                        case_insensitive: cat.case_insensitive,
                        tokens: cat.tokens.iter().cloned().collect(),
                    },
                )
            })
            .collect();

        let sentence_starters = doc.sentence_starters.as_ref().map(|s| CompiledStarters {
            require_following_space: s.require_following_space,
            min_word_length: s.min_word_length,
            words: s.categories.values().flatten().cloned().collect(),
        });

        Self {
            code: doc.metadata.code.clone(),
            name: doc.metadata.name.clone(),
            terminator_chars,
            terminator_patterns,
            ellipsis_patterns,
            ellipsis_treat_as_boundary: doc.ellipsis.treat_as_boundary,
            ellipsis_context_rules,
            ellipsis_exceptions,
            enclosures,
            open_to_id,
            close_to_id,
            suppression_fast,
            suppression_regex,
            abbreviations,
            sentence_starters,
        }
    }

    pub fn is_terminator_char(&self, c: char) -> bool {
        self.terminator_chars.contains(&c)
    }

    /// Longest matching multi-char terminator pattern starting at
    /// `rest`, if any.
    pub fn match_terminator_pattern<'a>(&self, rest: &'a str) -> Option<&'a str> {
        for (pattern, _name) in &self.terminator_patterns {
            if rest.starts_with(pattern.as_str()) {
                return Some(&rest[..pattern.len()]);
            }
        }
        None
    }

    /// Longest matching ellipsis literal starting at `rest`, if any.
    pub fn match_ellipsis<'a>(&self, rest: &'a str) -> Option<&'a str> {
        for pattern in &self.ellipsis_patterns {
            if rest.starts_with(pattern.as_str()) {
                return Some(&rest[..pattern.len()]);
            }
        }
        None
    }

    /// Resolve whether a matched ellipsis is a boundary: default,
    /// then first matching context rule, then exception veto
    /// (spec.md §4.2 step 3).
    pub fn ellipsis_is_boundary(&self, following_text: &str) -> bool {
        let mut decision = self.ellipsis_treat_as_boundary;
        for (condition, boundary) in &self.ellipsis_context_rules {
            if condition.matches_text(following_text) {
                decision = *boundary;
                break;
            }
        }
        if decision {
            for exc in &self.ellipsis_exceptions {
                if exc.is_match(following_text) {
                    return false;
                }
            }
        }
        decision
    }

    pub fn suppressed_by_fast_pattern(&self, c: char, before: CharClass, after: CharClass) -> bool {
        self.suppression_fast
            .iter()
            .any(|(ch, b, a)| *ch == c && *b == before && *a == after)
    }

    pub fn suppressed_by_regex(&self, window: &str) -> bool {
        self.suppression_regex.iter().any(|re| re.is_match(window))
    }

    pub fn is_abbreviation(&self, token: &str) -> bool {
        self.abbreviations.iter().any(|(_, set)| set.contains(token))
    }

    pub fn enclosure_id_for_open(&self, c: char) -> Option<usize> {
        self.open_to_id.get(&c).copied()
    }

    pub fn enclosure_id_for_close(&self, c: char) -> Option<usize> {
        self.close_to_id.get(&c).copied()
    }

    pub fn enclosure_count(&self) -> usize {
        self.enclosures.len()
    }

    /// Whether the token immediately after `following_ws` looks like a
    /// configured sentence opener (spec.md §3.1 `sentence_starters`).
    pub fn confirms_sentence_start(&self, following_text: &str) -> bool {
        let Some(starters) = &self.sentence_starters else {
            return false;
        };
        let trimmed = following_text.trim_start();
        if starters.require_following_space && trimmed.len() == following_text.len() && !following_text.is_empty() {
            // no leading whitespace was actually present
            return false;
        }
        let word = unicode_segmentation::UnicodeSegmentation::split_word_bounds(trimmed)
            .find(|w| w.chars().next().is_some_and(char::is_alphanumeric))
            .unwrap_or("");
        if word.chars().count() < starters.min_word_length {
            return false;
        }
        starters.words.contains(word)
    }

    /// Longest abbreviation token length across every category, used to
    /// size the scanner's bounded lookback window (spec.md §4.2 "a
    /// small lookback window (enough to recognise the longest
    /// abbreviation or ellipsis pattern)").
    pub fn max_pattern_width(&self) -> usize {
        let abbrev_max = self
            .abbreviations
            .iter()
            .flat_map(|(_, set)| set.tokens.iter())
            .map(|t| t.len())
            .max()
            .unwrap_or(0);
        let ellipsis_max = self.ellipsis_patterns.iter().map(|p| p.len()).max().unwrap_or(0);
        let terminator_max = self.terminator_patterns.iter().map(|(p, _)| p.len()).max().unwrap_or(0);
        abbrev_max.max(ellipsis_max).max(terminator_max).max(32)
    }

    /// Category name an abbreviation token is registered under, if any.
    /// Used by the scanner to exclude the `multi_dot` category from
    /// sentence-starter confirmation (spec.md §4.2 step 4: "the
    /// preceding context is not itself a known multi-dot abbreviation").
    pub fn abbreviation_category(&self, token: &str) -> Option<&str> {
        self.abbreviations
            .iter()
            .find(|(_, set)| set.contains(token))
            .map(|(name, _)| name.as_str())
    }
}
