//! Per-session query state.
//!
//! A [`BrowseSession`] owns the search term, selected category and page of
//! one browsing session against a shared, read-only catalog. It enforces the
//! reset rule: changing the search term or the category sends the session
//! back to page 1, whatever page was requested before.
//!
//! [`SessionCommand`] is the line protocol the interactive `browse` command
//! speaks:
//!
//! ```text
//! /search esp32      set the search term (everything after the first space)
//! /search            clear the search term
//! /category Video    select a category ("/category" alone selects All)
//! /page 3            jump to a page (clamped on evaluation)
//! n | next           next page
//! p | prev           previous page
//! q | quit           leave
//! ```

use crate::catalog::Catalog;
use crate::engine::{self, QueryResult};
use crate::facets::ALL;
use crate::query::Query;
use crate::types::Entry;
use thiserror::Error;

pub struct BrowseSession<'a, T> {
    catalog: &'a Catalog<T>,
    query: Query,
}

impl<'a, T: Entry> BrowseSession<'a, T> {
    /// Fresh session: no search, all categories, page 1.
    pub fn new(catalog: &'a Catalog<T>) -> Self {
        Self {
            catalog,
            query: Query::default(),
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.query.search {
            self.query.search = search;
            self.query.page = 1;
        }
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if category != self.query.category {
            self.query.category = category;
            self.query.page = 1;
        }
    }

    /// Request a page; out-of-range values are clamped by the next
    /// evaluation.
    pub fn go_to(&mut self, page: usize) {
        self.query.page = page;
    }

    pub fn next_page(&mut self) {
        let result = self.evaluate_unchanged();
        self.query.page = result.current_page.saturating_add(1).min(result.total_pages);
    }

    pub fn prev_page(&mut self) {
        let current = self.evaluate_unchanged().current_page;
        self.query.page = current.saturating_sub(1).max(1);
    }

    /// Evaluate the current query and keep the clamped page, so navigation
    /// continues from a page that exists.
    pub fn evaluate(&mut self) -> QueryResult<'a, T> {
        let result = self.evaluate_unchanged();
        self.query.page = result.current_page;
        result
    }

    fn evaluate_unchanged(&self) -> QueryResult<'a, T> {
        engine::evaluate_query(self.catalog, &self.query)
    }

    /// Apply one parsed command. Returns `false` when the session should end.
    pub fn apply(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::Search(term) => self.set_search(term),
            SessionCommand::Category(category) => self.set_category(category),
            SessionCommand::Page(page) => self.go_to(page),
            SessionCommand::Next => self.next_page(),
            SessionCommand::Prev => self.prev_page(),
            SessionCommand::Quit => return false,
        }
        true
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try /search, /category, /page, n, p, q)")]
    Unknown(String),
    #[error("'{0}' is not a page number")]
    BadPage(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Search(String),
    Category(String),
    Page(usize),
    Next,
    Prev,
    Quit,
}

impl SessionCommand {
    /// Parse one input line. Only the line terminator is stripped from the
    /// argument: a search for `" dht"` stays distinct from `"dht"`.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let (word, arg) = match line.split_once(' ') {
            Some((word, arg)) => (word, arg),
            None => (line, ""),
        };
        match word {
            "/search" | "/s" => Ok(SessionCommand::Search(arg.to_string())),
            "/category" | "/c" => {
                let category = if arg.is_empty() { ALL } else { arg };
                Ok(SessionCommand::Category(category.to_string()))
            }
            "/page" => arg
                .trim()
                .parse()
                .map(SessionCommand::Page)
                .map_err(|_| CommandError::BadPage(arg.to_string())),
            "n" | "next" => Ok(SessionCommand::Next),
            "p" | "prev" => Ok(SessionCommand::Prev),
            "q" | "quit" => Ok(SessionCommand::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    #[test]
    fn new_session_starts_on_first_page_of_everything() {
        let mut session = BrowseSession::new(data::projects());
        let result = session.evaluate();
        assert_eq!(result.current_page, 1);
        assert_eq!(result.total_matches, 15);
        assert_eq!(session.query().category, "All");
    }

    #[test]
    fn search_change_resets_page() {
        let mut session = BrowseSession::new(data::projects());
        session.go_to(3);
        assert_eq!(session.evaluate().current_page, 3);
        session.set_search("esp32");
        assert_eq!(session.query().page, 1);
        assert_eq!(session.evaluate().current_page, 1);
    }

    #[test]
    fn category_change_resets_page() {
        let mut session = BrowseSession::new(data::projects());
        session.go_to(2);
        session.set_category("Communication");
        assert_eq!(session.evaluate().current_page, 1);
    }

    #[test]
    fn unchanged_filters_keep_page() {
        let mut session = BrowseSession::new(data::projects());
        session.go_to(2);
        session.set_search("");
        session.set_category("All");
        assert_eq!(session.evaluate().current_page, 2);
    }

    #[test]
    fn next_and_prev_stay_in_bounds() {
        let mut session = BrowseSession::new(data::projects());
        session.prev_page();
        assert_eq!(session.query().page, 1);
        session.next_page();
        session.next_page();
        session.next_page();
        session.next_page();
        assert_eq!(session.query().page, 3);
        session.prev_page();
        assert_eq!(session.evaluate().current_page, 2);
    }

    #[test]
    fn next_from_unclamped_huge_page_lands_on_last() {
        let mut session = BrowseSession::new(data::projects());
        session.go_to(usize::MAX);
        session.next_page();
        assert_eq!(session.query().page, 3);

        session.go_to(usize::MAX);
        session.prev_page();
        assert_eq!(session.query().page, 2);
    }

    #[test]
    fn evaluate_stores_clamped_page() {
        let mut session = BrowseSession::new(data::projects());
        session.go_to(40);
        assert_eq!(session.evaluate().current_page, 3);
        assert_eq!(session.query().page, 3);
        session.prev_page();
        assert_eq!(session.query().page, 2);
    }

    #[test]
    fn apply_quit_ends_session() {
        let mut session = BrowseSession::new(data::modules());
        assert!(session.apply(SessionCommand::Search("oled".to_string())));
        assert!(!session.apply(SessionCommand::Quit));
        assert_eq!(session.query().search, "oled");
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            SessionCommand::parse("/search esp32 cam\n"),
            Ok(SessionCommand::Search("esp32 cam".to_string()))
        );
        assert_eq!(
            SessionCommand::parse("/search"),
            Ok(SessionCommand::Search(String::new()))
        );
        assert_eq!(
            SessionCommand::parse("/category Home Automation"),
            Ok(SessionCommand::Category("Home Automation".to_string()))
        );
        assert_eq!(
            SessionCommand::parse("/c"),
            Ok(SessionCommand::Category("All".to_string()))
        );
        assert_eq!(SessionCommand::parse("/page 2"), Ok(SessionCommand::Page(2)));
        assert_eq!(SessionCommand::parse("n"), Ok(SessionCommand::Next));
        assert_eq!(SessionCommand::parse("prev"), Ok(SessionCommand::Prev));
        assert_eq!(SessionCommand::parse("q"), Ok(SessionCommand::Quit));
    }

    #[test]
    fn parse_keeps_search_whitespace() {
        assert_eq!(
            SessionCommand::parse("/search  dht "),
            Ok(SessionCommand::Search(" dht ".to_string()))
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            SessionCommand::parse("/page two"),
            Err(CommandError::BadPage("two".to_string()))
        );
        assert_eq!(
            SessionCommand::parse("/jump"),
            Err(CommandError::Unknown("/jump".to_string()))
        );
    }
}
