//! Page title normalization
//!
//! Both the single-view and the bulk import path go through these functions,
//! so the natural key stays stable regardless of how a caller spelled a title.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical display form: underscores become spaces, whitespace runs
/// collapse to a single space, ends are trimmed, and the result is NFC.
pub fn normalize_display_title(title: &str) -> String {
    let spaced = title.replace('_', " ");
    spaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .nfc()
        .collect()
}

/// Lookup form used in the natural key: the display form with diacritics
/// stripped and case folded.
pub fn normalize_title_key(title: &str) -> String {
    normalize_display_title(title)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .nfc()
        .collect()
}
