use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Clean up extracted PDF text.
///
/// Applies unicode normalization, ligature replacement, page-break
/// normalization, replacement character removal and whitespace collapsing.
/// Line structure is preserved; downstream parsing is line oriented.
pub fn cleanup_text(text: &str) -> String {
    // 1. Unicode NFC normalization.
    let mut result: String = text.nfc().collect();

    // 2. Fix ligatures (ff, fi, fl, ffi, ffl).
    let ligatures = [
        ("\u{FB00}", "ff"),
        ("\u{FB01}", "fi"),
        ("\u{FB02}", "fl"),
        ("\u{FB03}", "ffi"),
        ("\u{FB04}", "ffl"),
    ];
    for (lig, replacement) in &ligatures {
        result = result.replace(lig, replacement);
    }

    // 3. Form feeds separate pages.
    result = result.replace('\x0C', "\n");

    // 4. Remove Unicode replacement character.
    result = result.replace('\u{FFFD}', "");

    // 5. Normalize excessive whitespace (3+ spaces -> 2).
    static RE_SPACES: OnceLock<Regex> = OnceLock::new();
    let re_spaces = RE_SPACES.get_or_init(|| Regex::new(r"[ ]{3,}").unwrap());
    result = re_spaces.replace_all(&result, "  ").to_string();

    result.trim().to_string()
}
