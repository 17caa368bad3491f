//! # Ghost Catalog
//!
//! Query engine and front-ends for a maker-hardware portal with two browsable
//! catalogs: a library hub of downloadable software modules and a project hub
//! of step-by-step hardware tutorials.
//!
//! # Architecture: One Pure Query, Several Front-Ends
//!
//! Every view, whether a CLI listing, the interactive browser or a generated
//! HTML page, is a function of the same read-only query:
//!
//! ```text
//! Catalog ──► facets   (computed once, first-occurrence order, "All" first)
//!    │
//!    └──► filter (search + category) ──► paginate (clamped) ──► QueryResult
//! ```
//!
//! Catalogs are immutable after construction, so a query result can borrow
//! straight from the catalog and any number of queries may run in parallel.
//! The only state in the system is the [`session::BrowseSession`], which
//! holds one user's query and resets the page when a filter changes.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Entity records (`Module`, `Project`) and the [`types::Entry`] trait |
//! | [`catalog`] | Immutable entity collections, file loading, validation, fingerprint |
//! | [`data`] | The built-in module and project catalogs |
//! | [`facets`] | Category list extraction |
//! | [`query`] | Search and category predicates |
//! | [`paginate`] | Page slicing with clamped page numbers |
//! | [`engine`] | `evaluate` and `resolve`, the query interface |
//! | [`session`] | Stateful browsing with the page-reset rule |
//! | [`badge`] | Category → badge color token |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`generate`] | Static HTML site rendered with Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Identifiers Are Data
//!
//! A module is addressed by its archive file name and a project by its slug.
//! Both come from the catalog as-is; nothing derives them from names, so
//! renaming an entry never breaks a link.
//!
//! ## Clamp, Don't Fail
//!
//! Asking for page 9 of a 3-page result returns page 3; an empty result still
//! has one page. A stale page number in a URL or a session can therefore
//! never produce an error state, only a different page.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, interpolation is
//! escaped by default, and there is no template directory to ship.

pub mod badge;
pub mod catalog;
pub mod config;
pub mod data;
pub mod engine;
pub mod facets;
pub mod generate;
pub mod output;
pub mod paginate;
pub mod query;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
