//! Accent folding for lexicon matching.
//!
//! Registry narratives mix accented and unaccented spellings of the same
//! Spanish words ("corazón" / "corazon"). Matching happens over a folded
//! form: compatibility-decomposed, combining marks removed, upper-cased.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Upper-cased, accent-stripped form of `text`.
pub fn fold(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_uppercase)
        .collect()
}

/// True when `needle` (already folded) occurs in `haystack` (already
/// folded) bounded by non-alphanumeric characters on both sides.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    for (pos, _) in haystack.match_indices(needle) {
        let before_ok = haystack[..pos]
            .chars()
            .next_back()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);
        let after_ok = haystack[pos + needle.len()..]
            .chars()
            .next()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);
        if before_ok && after_ok {
            return true;
        }
    }
    false
}
