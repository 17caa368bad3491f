//! Query evaluation: category and free-text predicates.
//!
//! An entity survives when both predicates hold:
//!
//! - **Category**: the selection is [`ALL`] or equals the entity's category
//!   exactly (case-sensitive).
//! - **Search**: the term is empty, or its lowercase form is a substring of
//!   the lowercased name or description.
//!
//! Matching is binary; there is no ranking. Survivors keep catalog order.
//! The search term is compared raw: surrounding whitespace is significant and
//! trimming is left to the caller.

use crate::facets::ALL;
use crate::types::Entry;
use serde::{Deserialize, Serialize};

/// The transient parameters of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub search: String,
    pub category: String,
    /// Requested page, 1-indexed. Clamped during pagination.
    pub page: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL.to_string(),
            page: 1,
        }
    }
}

impl Query {
    pub fn new(search: impl Into<String>, category: impl Into<String>, page: usize) -> Self {
        Self {
            search: search.into(),
            category: category.into(),
            page,
        }
    }

    /// Whether `other` selects a different result set (search or category
    /// differ). Page changes alone do not count.
    pub fn filters_differ(&self, other: &Query) -> bool {
        self.search != other.search || self.category != other.category
    }
}

pub fn matches_category<T: Entry>(entry: &T, category: &str) -> bool {
    category == ALL || entry.category() == category
}

/// `needle` must already be lowercased.
fn matches_lowered<T: Entry>(entry: &T, needle: &str) -> bool {
    needle.is_empty()
        || entry.name().to_lowercase().contains(needle)
        || entry.description().to_lowercase().contains(needle)
}

pub fn matches_search<T: Entry>(entry: &T, search: &str) -> bool {
    matches_lowered(entry, &search.to_lowercase())
}

/// Ordered subsequence of `entries` matching both predicates.
pub fn filter<'a, T: Entry>(entries: &'a [T], search: &str, category: &str) -> Vec<&'a T> {
    let needle = search.to_lowercase();
    entries
        .iter()
        .filter(|entry| matches_category(*entry, category) && matches_lowered(*entry, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ids, module};
    use crate::types::Module;

    fn sample() -> Vec<Module> {
        vec![
            module("oled.zip", "SSD1306 OLED", "UI"),
            module("dht.zip", "DHT Sensor", "Sensor"),
            Module {
                description: "Drives OLED panels over I2C".to_string(),
                ..module("gfx.zip", "Graphics Core", "UI")
            },
            module("relay.zip", "Relay Board", "Actuator"),
        ]
    }

    #[test]
    fn all_with_empty_search_keeps_everything_in_order() {
        let entries = sample();
        let found = filter(&entries, "", ALL);
        assert_eq!(ids(&found), vec!["oled.zip", "dht.zip", "gfx.zip", "relay.zip"]);
    }

    #[test]
    fn category_is_exact_and_case_sensitive() {
        let entries = sample();
        assert_eq!(ids(&filter(&entries, "", "UI")), vec!["oled.zip", "gfx.zip"]);
        assert!(filter(&entries, "", "ui").is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let entries = sample();
        // "oled" hits the first name and the third description.
        assert_eq!(ids(&filter(&entries, "oLeD", ALL)), vec!["oled.zip", "gfx.zip"]);
    }

    #[test]
    fn search_matches_mid_word() {
        let entries = sample();
        assert_eq!(ids(&filter(&entries, "ens", ALL)), vec!["dht.zip"]);
    }

    #[test]
    fn search_whitespace_is_not_trimmed() {
        let entries = sample();
        assert!(filter(&entries, " dht ", ALL).is_empty());
        assert_eq!(ids(&filter(&entries, "dht ", ALL)), vec!["dht.zip"]);
    }

    #[test]
    fn both_predicates_must_hold() {
        let entries = sample();
        assert!(filter(&entries, "relay", "UI").is_empty());
        assert_eq!(ids(&filter(&entries, "oled", "UI")), vec!["oled.zip", "gfx.zip"]);
    }

    #[test]
    fn unknown_category_is_empty_not_error() {
        let entries = sample();
        assert!(filter(&entries, "", "Quantum").is_empty());
    }

    #[test]
    fn filters_differ_ignores_page() {
        let a = Query::new("esp", ALL, 1);
        let b = Query::new("esp", ALL, 3);
        let c = Query::new("esp", "Video", 1);
        assert!(!a.filters_differ(&b));
        assert!(a.filters_differ(&c));
    }

    #[test]
    fn default_query_selects_everything() {
        let q = Query::default();
        assert_eq!(q.search, "");
        assert_eq!(q.category, "All");
        assert_eq!(q.page, 1);
    }
}
