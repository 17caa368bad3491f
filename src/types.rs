//! Entity shapes for both catalogs.
//!
//! The module library and the project tutorials share a common core
//! (identifier, name, description, category) exposed through the [`Entry`]
//! trait. Everything the query engine needs goes through that trait; the
//! catalog-specific extras are only read by the presentation layers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fields every catalog entity exposes to the query engine.
pub trait Entry {
    /// Stable identifier, unique within its catalog.
    fn id(&self) -> &str;
    /// Display title.
    fn name(&self) -> &str;
    /// Free text searched alongside the name.
    fn description(&self) -> &str;
    /// Single category label, compared by exact string equality.
    fn category(&self) -> &str;
}

/// A downloadable software module from the library hub.
///
/// The archive file name doubles as the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Module {
    pub file: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
}

impl Entry for Module {
    fn id(&self) -> &str {
        &self.file
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// Skill level a project tutorial targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    /// Display token for the difficulty badge.
    pub fn badge(self) -> &'static str {
        match self {
            Difficulty::Beginner => "emerald",
            Difficulty::Intermediate => "yellow",
            Difficulty::Advanced => "rose",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A titled block of prose in a project manual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TutorialSection {
    pub title: String,
    pub content: String,
}

/// A tutorial project with its build manual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Project {
    /// URL slug, e.g. `esp32-dht-web-server`.
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    pub components: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<TutorialSection>,
    /// Preformatted sketch shown verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram_url: Option<String>,
}

impl Entry for Project {
    fn id(&self) -> &str {
        &self.slug
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }
}
