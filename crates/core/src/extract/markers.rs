use std::sync::OnceLock;

use regex::Regex;

/// Strip inline correctness markers from a choice's text.
///
/// Markers are `*`, `(correct)` and `[correct]` (any case), anywhere in the
/// text. Returns the cleaned text and whether any marker was present.
pub fn strip_markers(raw: &str) -> (String, bool) {
    static RE_MARKER: OnceLock<Regex> = OnceLock::new();
    let re_marker = RE_MARKER
        .get_or_init(|| Regex::new(r"(?i)\s*(?:\*|\(correct\)|\[correct\])").unwrap());

    let marked = re_marker.is_match(raw);
    if !marked {
        return (raw.trim().to_string(), false);
    }

    // Removing one marker can join its neighbours into another, e.g. `(cor*rect)`.
    let mut text = raw.to_string();
    while re_marker.is_match(&text) {
        text = re_marker.replace_all(&text, "").into_owned();
    }

    (text.trim().to_string(), true)
}
