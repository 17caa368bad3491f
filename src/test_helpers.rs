//! Shared test utilities.
//!
//! Builders for small ad-hoc catalogs plus lookups into the built-in data
//! that panic with the available identifiers on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let entries = vec![module("oled.zip", "SSD1306 OLED", "UI")];
//! let found = query::filter(&entries, "oled", ALL);
//! assert_eq!(ids(&found), vec!["oled.zip"]);
//!
//! let project = find_project("esp32-lora-long-range");
//! assert_eq!(project.category, "Communication");
//! ```

use crate::data;
use crate::types::{Entry, Module, Project};

// =========================================================================
// Builders
// =========================================================================

/// A module with an empty description.
pub fn module(file: &str, name: &str, category: &str) -> Module {
    Module {
        file: file.to_string(),
        name: name.to_string(),
        description: String::new(),
        category: category.to_string(),
    }
}

// =========================================================================
// Extractors
// =========================================================================

/// Identifiers of `items`, in order.
pub fn ids<'a, T: Entry>(items: &[&'a T]) -> Vec<&'a str> {
    items.iter().map(|&item| item.id()).collect()
}

// =========================================================================
// Built-in lookups: panic with the available ids on a miss
// =========================================================================

/// Find a built-in project by slug. Panics if not found.
pub fn find_project(slug: &str) -> &'static Project {
    let catalog = data::projects();
    catalog
        .all()
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = catalog.all().iter().map(|p| p.slug.as_str()).collect();
            panic!("project '{slug}' not found. Available: {slugs:?}")
        })
}

/// Find a built-in module by file name. Panics if not found.
pub fn find_module(file: &str) -> &'static Module {
    let catalog = data::modules();
    catalog
        .all()
        .iter()
        .find(|m| m.file == file)
        .unwrap_or_else(|| {
            let files: Vec<&str> = catalog.all().iter().map(|m| m.file.as_str()).collect();
            panic!("module '{file}' not found. Available: {files:?}")
        })
}
