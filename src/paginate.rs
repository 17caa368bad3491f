//! Page slicing with clamped page numbers.
//!
//! Pagination never fails: an empty result still has one (empty) page, and a
//! requested page outside `[1, total_pages]` is clamped into range.
//!
//! ```text
//! total_pages  = max(1, ceil(len / size))
//! current_page = clamp(requested, 1, total_pages)
//! items        = filtered[(current_page - 1) * size ..][.. size]
//! ```

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Pagination policy of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    /// One page holding every match.
    Unpaginated,
    /// Fixed number of items per page.
    Fixed(NonZeroUsize),
}

impl PageSize {
    /// `Fixed(n)` for non-zero `n`, otherwise `Unpaginated`.
    pub fn from_count(n: usize) -> Self {
        NonZeroUsize::new(n).map_or(PageSize::Unpaginated, PageSize::Fixed)
    }

    /// Effective items per page for a result of `len` items.
    pub fn per_page(self, len: usize) -> usize {
        match self {
            PageSize::Unpaginated => len,
            PageSize::Fixed(n) => n.get(),
        }
    }

    pub fn total_pages(self, len: usize) -> usize {
        match self {
            PageSize::Unpaginated => 1,
            PageSize::Fixed(n) => len.div_ceil(n.get()).max(1),
        }
    }
}

/// One page of a filtered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paged<I> {
    pub items: Vec<I>,
    pub total_pages: usize,
    pub current_page: usize,
    /// Length of the filtered sequence before slicing.
    pub total_items: usize,
    /// Position of `items[0]` within the filtered sequence.
    pub offset: usize,
}

/// Slice `filtered` down to the requested page.
pub fn paginate<I>(filtered: Vec<I>, size: PageSize, requested: usize) -> Paged<I> {
    let total_items = filtered.len();
    let total_pages = size.total_pages(total_items);
    let current_page = requested.clamp(1, total_pages);
    let per_page = size.per_page(total_items);
    let start = (current_page - 1) * per_page;
    let items = filtered.into_iter().skip(start).take(per_page).collect();
    Paged {
        items,
        total_pages,
        current_page,
        total_items,
        offset: start,
    }
}
