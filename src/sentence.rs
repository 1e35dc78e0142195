//! The output type produced by the executor and handed to callers.

use serde::{Deserialize, Serialize};

/// A single segmented sentence with its span into the original input.
///
/// `start`/`end` are byte offsets into the decoded (UTF-8) input and
/// always satisfy `input[start..end]` being a valid slice boundary.
/// `end` is exclusive.
///
/// When whitespace is trimmed (the default), `text` holds the trimmed
/// view but `start`/`end` still span the leading whitespace, so
/// `input[start..end]` reconstructs the raw slice including it. Pass
/// `preserve_whitespace: true` in `SplitOptions` to make `text` equal
/// `input[start..end]` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// The sentence's textual content.
    pub text: String,

    /// Start byte offset into the original input, inclusive.
    pub start: usize,

    /// End byte offset into the original input, exclusive.
    pub end: usize,

    /// Reserved for future non-rule-driven segmentation. Always `1.0`
    /// for this rule-driven engine.
    pub confidence: f64,

    /// Reserved extension bag. Empty for every sentence this engine
    /// produces today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Sentence {
    pub(crate) fn new(text: String, start: usize, end: usize) -> Self {
        Self {
            text,
            start,
            end,
            confidence: 1.0,
            metadata: None,
        }
    }

    /// Length of `text` in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether `text` is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
