//! Category facet extraction.
//!
//! Categories are not declared anywhere: the facet list is derived from the
//! data itself, in order of first appearance, and always headed by the
//! synthetic [`ALL`] value that no entity carries.

use crate::types::Entry;
use std::collections::HashSet;

/// The "all categories" sentinel. Selecting it disables category filtering.
pub const ALL: &str = "All";

/// Build `["All", c1, c2, ...]` from the distinct categories of `entries`.
///
/// Labels keep the exact spelling of their first occurrence; `"Sensor"` and
/// `"Sensors"` are different facets.
pub fn extract_categories<T: Entry>(entries: &[T]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = vec![ALL.to_string()];
    for entry in entries {
        if seen.insert(entry.category()) {
            categories.push(entry.category().to_string());
        }
    }
    categories
}
