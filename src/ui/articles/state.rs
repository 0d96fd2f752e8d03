//! State for the article list.

use std::fmt;

use crate::article::Article;
use crate::ui::mvi::UiState;

use super::query::{filter_articles, sort_articles, SortKey};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Article list view-model.
///
/// `visible_set` is always `full_set` filtered by `search_term` and then
/// ordered by `sort_key`. `current_page` is 1-based and stays within
/// `1..=total_pages()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleListState {
    pub(super) full_set: Vec<Article>,
    pub(super) visible_set: Vec<Article>,
    pub(super) search_term: String,
    pub(super) sort_key: Option<SortKey>,
    pub(super) current_page: usize,
    pub(super) page_size: usize,
    /// Cursor within the current page.
    pub(super) selected: usize,
    pub(super) load_error: Option<String>,
    pub(super) loaded: bool,
}

impl Default for ArticleListState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl UiState for ArticleListState {}

/// "Showing" counter: 1-based inclusive range of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Showing {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl fmt::Display for Showing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} of {}", self.start, self.end, self.total)
    }
}

impl ArticleListState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            full_set: Vec::new(),
            visible_set: Vec::new(),
            search_term: String::new(),
            sort_key: None,
            current_page: 1,
            page_size: page_size.max(1),
            selected: 0,
            load_error: None,
            loaded: false,
        }
    }

    pub fn full_set(&self) -> &[Article] {
        &self.full_set
    }

    pub fn visible_set(&self) -> &[Article] {
        &self.visible_set
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Error from the most recent failed load, cleared by the next success.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// True once any load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of articles held, before filtering.
    pub fn total_count(&self) -> usize {
        self.full_set.len()
    }

    /// Pages in the visible set; zero when it is empty.
    pub fn total_pages(&self) -> usize {
        self.visible_set.len().div_ceil(self.page_size)
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// The `page_size` window of the visible set for the current page.
    pub fn page_slice(&self) -> &[Article] {
        let start = (self.current_page - 1) * self.page_size;
        if start >= self.visible_set.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.visible_set.len());
        &self.visible_set[start..end]
    }

    pub fn showing(&self) -> Showing {
        let total = self.visible_set.len();
        if total == 0 {
            return Showing {
                start: 0,
                end: 0,
                total,
            };
        }
        let start = (self.current_page - 1) * self.page_size;
        Showing {
            start: start + 1,
            end: (start + self.page_size).min(total),
            total,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Article under the cursor on the current page.
    pub fn selected(&self) -> Option<&Article> {
        self.page_slice().get(self.selected)
    }

    /// Rebuild the visible set from the full set and go back to page 1.
    pub(super) fn recompute(&mut self) {
        let mut visible = filter_articles(&self.full_set, &self.search_term);
        if let Some(key) = self.sort_key {
            sort_articles(&mut visible, key);
        }
        self.visible_set = visible;
        self.current_page = 1;
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty_first_page() {
        let state = ArticleListState::default();
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(state.total_pages(), 0);
        assert!(state.page_slice().is_empty());
        assert!(!state.is_loaded());
    }

    #[test]
    fn empty_showing_is_zero_range() {
        let state = ArticleListState::default();
        assert_eq!(state.showing().to_string(), "0-0 of 0");
    }

    #[test]
    fn page_size_is_at_least_one() {
        assert_eq!(ArticleListState::with_page_size(0).page_size(), 1);
    }
}
