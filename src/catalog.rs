//! Catalog store: an immutable, ordered collection of one entity shape.
//!
//! A [`Catalog`] is built once, either from literal data compiled into the
//! binary (see [`crate::data`]) or from a TOML/JSON file named in the config,
//! and never mutated afterwards. The facet list is derived at construction
//! because the entries cannot change.
//!
//! ## File formats
//!
//! ```toml
//! # projects.toml
//! [[entries]]
//! slug = "esp32-blink"
//! name = "ESP32 Blink"
//! category = "Basics"
//! difficulty = "Beginner"
//! components = ["ESP32"]
//! instructions = ["Upload the sketch."]
//! ```
//!
//! JSON files may hold either a bare array of entries or an object with an
//! `entries` array.
//!
//! Loading validates what the type system cannot: identifiers and names are
//! non-empty, identifiers are unique, and every identifier is a single
//! URL-safe path segment (it becomes a page directory or a download file). Literal catalogs skip this at
//! runtime; their tests assert it instead.

use crate::facets;
use crate::paginate::PageSize;
use crate::types::Entry;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported catalog format '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),
    #[error("entry #{index} has an empty identifier")]
    EmptyId { index: usize },
    #[error("identifier '{id}' is not URL-safe (allowed: A-Z a-z 0-9 . _ -)")]
    InvalidId { id: String },
    #[error("entry '{id}' has an empty name")]
    EmptyName { id: String },
    #[error("duplicate identifier '{id}'")]
    DuplicateId { id: String },
}

/// On-disk wrapper: `[[entries]]` in TOML, `{"entries": [...]}` in JSON.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile<T> {
    entries: Vec<T>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCatalog<T> {
    Bare(Vec<T>),
    Wrapped(CatalogFile<T>),
}

#[derive(Debug, Clone)]
pub struct Catalog<T> {
    entries: Vec<T>,
    categories: Vec<String>,
    page_size: PageSize,
}

impl<T: Entry> Catalog<T> {
    /// Wrap entries in their given order. Unpaginated until
    /// [`with_page_size`](Self::with_page_size) says otherwise.
    pub fn new(entries: Vec<T>) -> Self {
        let categories = facets::extract_categories(&entries);
        Self {
            entries,
            categories,
            page_size: PageSize::Unpaginated,
        }
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn all(&self) -> &[T] {
        &self.entries
    }

    /// `["All", ...]` in first-occurrence order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check identifier and name invariants.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.id().is_empty() {
                return Err(CatalogError::EmptyId { index });
            }
            if !is_url_safe(entry.id()) {
                return Err(CatalogError::InvalidId {
                    id: entry.id().to_string(),
                });
            }
            if entry.name().is_empty() {
                return Err(CatalogError::EmptyName {
                    id: entry.id().to_string(),
                });
            }
            if !seen.insert(entry.id()) {
                return Err(CatalogError::DuplicateId {
                    id: entry.id().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// ASCII letters, digits, `.`, `_` and `-`, and not a `.`/`..` segment.
fn is_url_safe(id: &str) -> bool {
    id != "."
        && id != ".."
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

impl<T: Entry + DeserializeOwned> Catalog<T> {
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile<T> = toml::from_str(content)?;
        Self::validated(file.entries)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let entries = match serde_json::from_str::<JsonCatalog<T>>(content)? {
            JsonCatalog::Bare(entries) => entries,
            JsonCatalog::Wrapped(file) => file.entries,
        };
        Self::validated(entries)
    }

    /// Load a catalog file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if ext != "toml" && ext != "json" {
            return Err(CatalogError::UnsupportedFormat(path.display().to_string()));
        }
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = if ext == "toml" {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };
        tracing::info!(path = %path.display(), entries = catalog.len(), "loaded catalog file");
        Ok(catalog)
    }

    fn validated(entries: Vec<T>) -> Result<Self, CatalogError> {
        let catalog = Self::new(entries);
        catalog.validate()?;
        Ok(catalog)
    }
}

impl<T: Entry + Serialize> Catalog<T> {
    /// SHA-256 of the canonical JSON form of the entries, as hex.
    ///
    /// Serves as the catalog version: any edit to any entry changes it.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for entry in &self.entries {
            // Serializing plain structs of strings cannot fail.
            let bytes = serde_json::to_vec(entry).unwrap_or_default();
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(&bytes);
        }
        format!("{:x}", hasher.finalize())
    }
}
