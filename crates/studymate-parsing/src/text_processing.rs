use once_cell::sync::Lazy;
use regex::Regex;

/// Collapse every maximal run of whitespace into a single space.
///
/// Leading and trailing runs are collapsed too, not removed. Applying this
/// to its own output is a no-op.
pub fn normalize_whitespace(text: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
    RE.replace_all(text, " ").into_owned()
}

/// Expand common typographic ligatures found in PDFs.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}

/// The first `max_chars` characters of `text`.
///
/// Counts Unicode scalar values, so the cut never lands inside a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
