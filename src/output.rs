//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity is shown as a header line (position + name + short detail)
//! followed by indented context lines. The identifier a user types into
//! `project <slug>` or `module <file>` is always one of those context lines.
//!
//! ## Listing
//!
//! ```text
//! Projects: 3 matches (search "esp32 ble", category All)
//! 001 ESP32 BLE: Scanner and Client [Communication] Intermediate
//!     Slug: esp32-ble-server-scanner
//!     Discover nearby Bluetooth Low Energy devices and read their services.
//! Page 1/1
//! ```
//!
//! ## Detail
//!
//! ```text
//! ESP32 LoRa: Long Range Communication
//!     Slug: esp32-lora-long-range
//!     Category: Communication
//!     Difficulty: Advanced
//!
//! Components
//!     - 2x ESP32
//! Instructions
//!     1. Wire the RFM95 to ESP32 SPI pins (SCK, MISO, MOSI, CS).
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::catalog::Catalog;
use crate::engine::QueryResult;
use crate::generate::SiteSummary;
use crate::query::Query;
use crate::types::{Entry, Module, Project};
use serde::Serialize;

/// Longest description shown in a listing before truncation.
const LISTING_DESC_CHARS: usize = 80;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Per-catalog listing details.
pub trait Listing: Entry {
    /// Label of the identifier context line.
    const ID_LABEL: &'static str;

    /// Text after the name on the header line.
    fn header_detail(&self) -> String;
}

impl Listing for Module {
    const ID_LABEL: &'static str = "File";

    fn header_detail(&self) -> String {
        format!("[{}]", self.category)
    }
}

impl Listing for Project {
    const ID_LABEL: &'static str = "Slug";

    fn header_detail(&self) -> String {
        format!("[{}] {}", self.category, self.difficulty)
    }
}

fn bullet_block(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(title.to_string());
    for item in items {
        lines.push(format!("{}- {}", indent(1), item));
    }
}

// ============================================================================
// Listing
// ============================================================================

/// Format one page of query results.
pub fn format_listing<T: Listing>(
    heading: &str,
    query: &Query,
    result: &QueryResult<'_, T>,
) -> Vec<String> {
    let noun = if result.total_matches == 1 { "match" } else { "matches" };
    let search = if query.search.is_empty() {
        String::new()
    } else {
        format!("search {:?}, ", query.search)
    };
    let mut lines = vec![format!(
        "{}: {} {} ({}category {})",
        heading, result.total_matches, noun, search, query.category
    )];

    if result.is_empty() {
        lines.push(format!("{}No matches", indent(1)));
    }

    for (i, item) in result.items.iter().enumerate() {
        lines.push(format!(
            "{} {} {}",
            format_index(result.offset + i + 1),
            item.name(),
            item.header_detail()
        ));
        lines.push(format!("{}{}: {}", indent(1), T::ID_LABEL, item.id()));
        if !item.description().is_empty() {
            lines.push(format!(
                "{}{}",
                indent(1),
                truncate_desc(item.description(), LISTING_DESC_CHARS)
            ));
        }
    }

    lines.push(format!("Page {}/{}", result.current_page, result.total_pages));
    lines
}

pub fn print_listing<T: Listing>(heading: &str, query: &Query, result: &QueryResult<'_, T>) {
    print_lines(&format_listing(heading, query, result));
}

/// Facet list, one category per line.
pub fn format_categories(categories: &[String]) -> Vec<String> {
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} {}", format_index(i + 1), c))
        .collect()
}

// ============================================================================
// Detail views
// ============================================================================

pub fn format_project_detail(project: &Project) -> Vec<String> {
    let mut lines = vec![
        project.name.clone(),
        format!("{}Slug: {}", indent(1), project.slug),
        format!("{}Category: {}", indent(1), project.category),
        format!("{}Difficulty: {}", indent(1), project.difficulty),
    ];
    if !project.description.is_empty() {
        lines.push(format!("{}{}", indent(1), project.description));
    }
    lines.push(String::new());

    bullet_block(&mut lines, "Requirements", &project.requirements);
    bullet_block(&mut lines, "Components", &project.components);

    if !project.instructions.is_empty() {
        lines.push("Instructions".to_string());
        for (i, step) in project.instructions.iter().enumerate() {
            lines.push(format!("{}{}. {}", indent(1), i + 1, step));
        }
    }

    for section in &project.sections {
        lines.push(section.title.clone());
        lines.push(format!("{}{}", indent(1), section.content));
    }

    if let Some(code) = &project.code {
        lines.push("Code".to_string());
        lines.extend(code.lines().map(|l| format!("{}{}", indent(1), l)));
    }

    if let Some(url) = &project.diagram_url {
        lines.push(format!("Diagram: {}", url));
    }
    lines
}

pub fn format_module_detail(module: &Module, download_url: &str) -> Vec<String> {
    let mut lines = vec![
        module.name.clone(),
        format!("{}File: {}", indent(1), module.file),
        format!("{}Category: {}", indent(1), module.category),
    ];
    if !module.description.is_empty() {
        lines.push(format!("{}{}", indent(1), module.description));
    }
    lines.push(format!("{}Download: {}", indent(1), download_url));
    lines
}

/// The "not found" state of a detail view.
pub fn format_not_found(kind: &str, id: &str) -> Vec<String> {
    vec![
        "404 // NODE_NOT_FOUND".to_string(),
        format!("{}No {} with identifier {:?}", indent(1), kind, id),
    ]
}

// ============================================================================
// Check
// ============================================================================

/// Summary of one catalog for the `check` command.
pub fn format_check<T: Entry + Serialize>(heading: &str, catalog: &Catalog<T>) -> Vec<String> {
    let mut lines = vec![format!("{} ({} entries)", heading, catalog.len())];
    lines.push(format!("{}Version: {}", indent(1), catalog.fingerprint()));
    let categories = catalog.categories().get(1..).unwrap_or_default();
    lines.push(format!("{}Categories: {}", indent(1), categories.join(", ")));
    lines
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_summary(summary: &SiteSummary) -> Vec<String> {
    vec![
        format!("Module listings: {}", summary.module_listings),
        format!("Project listings: {}", summary.project_listings),
        format!("Project manuals: {}", summary.project_pages),
        format!("Generated {} pages", summary.total_pages),
    ]
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
