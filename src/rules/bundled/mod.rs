//! Prebuilt `LanguageRules` handles for the languages this crate ships
//! out of the box, mirroring the original bindings' `language="en"` /
//! `language="ja"` bundled lookups
//! (`examples/original_source/.../streaming_demo.py`).
//!
//! Built once per process and shared by reference, the way the
//! teacher's `chunkers/base.rs` memoises its `TiktokenCounter` behind
//! `lazy_static!`.

mod en;
mod ja;

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::rules::LanguageRules;

lazy_static! {
    static ref EN: Arc<LanguageRules> =
        Arc::new(en::rules().expect("bundled 'en' language rules failed to compile"));
    static ref JA: Arc<LanguageRules> =
        Arc::new(ja::rules().expect("bundled 'ja' language rules failed to compile"));
}

/// Look up a bundled language by its code (case-insensitive). Returns
/// `None` for anything not bundled; the caller (`SplitOptions::resolve_rules`)
/// turns that into `SbdError::UnsupportedLanguage`.
pub fn lookup(code: &str) -> Option<Arc<LanguageRules>> {
    match code.to_ascii_lowercase().as_str() {
        "en" | "english" => Some(Arc::clone(&EN)),
        "ja" | "japanese" => Some(Arc::clone(&JA)),
        _ => None,
    }
}

/// Names of every bundled language, for diagnostics and tests.
pub fn names() -> &'static [&'static str] {
    &["en", "ja"]
}
