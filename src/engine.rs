//! The query interface consumed by front-ends.
//!
//! [`evaluate`] chains facet lookup, filtering and pagination into one pure
//! call; [`resolve`] is the detail-view lookup. Neither keeps state: the page
//! reset that follows a search or category change is the caller's job (see
//! [`crate::session::BrowseSession`]).

use crate::catalog::Catalog;
use crate::paginate;
use crate::query::{self, Query};
use crate::types::Entry;
use serde::Serialize;

/// Everything a listing view needs to render one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult<'a, T> {
    pub items: Vec<&'a T>,
    pub total_pages: usize,
    /// Requested page after clamping into `[1, total_pages]`.
    pub current_page: usize,
    /// Matches across all pages.
    pub total_matches: usize,
    /// Position of `items[0]` among all matches.
    pub offset: usize,
    /// Facet list of the whole catalog, independent of the query.
    pub categories: &'a [String],
}

impl<T> QueryResult<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Filter `catalog` by `search` and `category`, then cut out page `page`
/// using the catalog's page size.
pub fn evaluate<'a, T: Entry>(
    catalog: &'a Catalog<T>,
    search: &str,
    category: &str,
    page: usize,
) -> QueryResult<'a, T> {
    let filtered = query::filter(catalog.all(), search, category);
    let paged = paginate::paginate(filtered, catalog.page_size(), page);
    tracing::debug!(
        search,
        category,
        requested_page = page,
        current_page = paged.current_page,
        matches = paged.total_items,
        "evaluated catalog query"
    );
    QueryResult {
        items: paged.items,
        total_pages: paged.total_pages,
        current_page: paged.current_page,
        total_matches: paged.total_items,
        offset: paged.offset,
        categories: catalog.categories(),
    }
}

pub fn evaluate_query<'a, T: Entry>(catalog: &'a Catalog<T>, query: &Query) -> QueryResult<'a, T> {
    evaluate(catalog, &query.search, &query.category, query.page)
}

/// First entry whose identifier equals `id`, or `None`.
///
/// Identifiers are unique in well-formed catalogs; should that ever not hold,
/// the earliest entry wins.
pub fn resolve<'a, T: Entry>(catalog: &'a Catalog<T>, id: &str) -> Option<&'a T> {
    catalog.all().iter().find(|entry| entry.id() == id)
}
