//! Case normalization and answer/keyword matching.
//!
//! Only ASCII `A`-`Z` are folded. Chinese text and any other non-ASCII
//! characters pass through untouched.

/// Normalize an english field for storage and lookup (trim, ASCII-lowercase).
pub fn normalize_english(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

/// Normalize a typed answer: trim, collapse inner whitespace, ASCII-lowercase.
fn normalize_answer(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// Compare a typed answer to the stored english field, ignoring ASCII case.
pub fn answers_match(typed: &str, english: &str) -> bool {
    normalize_answer(typed) == normalize_answer(english)
}

/// Whether `keyword` occurs in an entry.
///
/// The english side is matched case-insensitively, the chinese side exactly.
/// An empty keyword never matches.
pub fn keyword_matches(keyword: &str, english: &str, chinese: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    let lowered = keyword.to_ascii_lowercase();
    english.to_ascii_lowercase().contains(&lowered) || chinese.contains(keyword)
}
