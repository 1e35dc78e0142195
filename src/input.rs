//! The `Input` sum type at the core boundary.
//!
//! Bindings map their host types (a Python `str`/`bytes`/`Path`/file
//! object, a JS `string`/`Buffer`/stream, ...) onto one of these
//! variants rather than the core overloading on runtime type (see
//! spec.md §9, "File-vs-text input polymorphism").

use std::io::Read;
use std::path::PathBuf;

/// Declared encoding of a byte buffer. `Utf8` is assumed unless the
/// caller says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Ascii,
    Latin1,
}

impl Encoding {
    /// Parse an encoding label as accepted by `SplitOptions::encoding`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Some(Encoding::Utf8),
            "ascii" | "us-ascii" => Some(Encoding::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" => Some(Encoding::Latin1),
            _ => None,
        }
    }
}

/// A text-like input source accepted by the segmentation API.
///
/// A bare string is always `Input::Text` — callers must opt into path
/// interpretation explicitly via `Input::path` (spec.md §6: "a string
/// is treated as text content unless the caller explicitly marks it
/// as a path").
pub enum Input {
    /// In-memory, already-decoded text.
    Text(String),

    /// A byte buffer with a declared encoding, transcoded to UTF-8
    /// before scanning.
    Bytes { data: Vec<u8>, encoding: Encoding },

    /// A filesystem path, read lazily in streaming mode and fully in
    /// parallel/sequential mode.
    Path(PathBuf),

    /// A pull-based reader. Consumed by the streaming executor only;
    /// sequential/parallel modes read it to completion first.
    Reader(Box<dyn Read + Send>),
}

impl Input {
    /// Wrap an explicit filesystem path.
    pub fn path(p: impl Into<PathBuf>) -> Self {
        Input::Path(p.into())
    }

    /// Wrap a byte buffer with a declared encoding.
    pub fn bytes(data: Vec<u8>, encoding: Encoding) -> Self {
        Input::Bytes { data, encoding }
    }
}

impl From<&str> for Input {
    fn from(s: &str) -> Self {
        Input::Text(s.to_string())
    }
}

impl From<String> for Input {
    fn from(s: String) -> Self {
        Input::Text(s)
    }
}

impl From<PathBuf> for Input {
    fn from(p: PathBuf) -> Self {
        Input::Path(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_string_is_never_auto_detected_as_a_path() {
        match Input::from("/etc/hosts") {
            Input::Text(s) => assert_eq!(s, "/etc/hosts"),
            _ => panic!("a bare &str must always become Input::Text"),
        }
    }

    #[test]
    fn explicit_path_constructor_opts_in() {
        match Input::path("/etc/hosts") {
            Input::Path(p) => assert_eq!(p, PathBuf::from("/etc/hosts")),
            _ => panic!("Input::path must produce Input::Path"),
        }
    }

    #[test]
    fn encoding_labels_are_case_insensitive() {
        assert_eq!(Encoding::parse("UTF-8"), Some(Encoding::Utf8));
        assert_eq!(Encoding::parse("ascii"), Some(Encoding::Ascii));
        assert_eq!(Encoding::parse("ISO-8859-1"), Some(Encoding::Latin1));
        assert_eq!(Encoding::parse("ebcdic"), None);
    }
}
