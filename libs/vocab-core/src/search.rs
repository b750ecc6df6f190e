//! Substring search over both language fields.

use crate::matching::keyword_matches;
use crate::store::Store;
use crate::types::Entry;

/// Entries whose english contains `keyword` (ignoring ASCII case) or whose
/// chinese contains it exactly, in store order.
///
/// Surrounding whitespace is ignored; a blank keyword returns nothing.
pub fn search<'a>(store: &'a Store, keyword: &str) -> Vec<&'a Entry> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Vec::new();
    }
    store
        .all()
        .iter()
        .filter(|e| keyword_matches(keyword, &e.english, &e.chinese))
        .collect()
}
