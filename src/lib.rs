//! Terminal front-end for a news-scraping REST backend.
//!
//! The crate is organised around the article list view-model
//! ([`ui::articles`]), which owns the fetched articles and derives the
//! filtered, sorted and paginated view the terminal renders. The remaining
//! modules are glue around it: the HTTP gateway ([`api`]), the persisted
//! local state ([`storage`]), scraping jobs ([`scrape`]), statistics
//! ([`stats`]) and the cancellable refresh timer ([`refresh`]).

pub mod api;
pub mod article;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod logging;
pub mod refresh;
pub mod scrape;
pub mod stats;
pub mod storage;
pub mod ui;
