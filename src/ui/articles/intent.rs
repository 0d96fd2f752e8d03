//! Intents for the article list.

use crate::article::Article;
use crate::ui::mvi::Intent;

use super::query::SortKey;

#[derive(Debug, Clone)]
pub enum ArticleIntent {
    /// A load succeeded; replaces the whole set.
    Loaded { articles: Vec<Article> },

    /// A load failed. Articles and paging are left as they were.
    LoadFailed { message: String },

    /// Backend deletion succeeded; empties the list.
    Cleared,

    Filter { term: String },

    Sort { key: SortKey },

    NextPage,

    PreviousPage,

    SelectNext,

    SelectPrevious,
}

impl Intent for ArticleIntent {}
