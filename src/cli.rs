//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::ui::articles::SortKey;

/// Terminal desk for the news scraper backend
#[derive(Parser, Debug)]
#[command(name = "newsdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, env = "NEWSDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Articles resource base URL, overriding the config file
    #[arg(long, global = true, env = "NEWSDESK_BASE_URL")]
    pub base_url: Option<String>,

    /// Path to the local state file, overriding the config file
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive terminal UI (default)
    Tui,

    /// Print one page of articles
    List {
        /// Case-insensitive match on title, description or authors
        #[arg(long, default_value = "")]
        search: String,

        /// newest, oldest, title or title-desc
        #[arg(long)]
        sort: Option<SortKey>,

        /// 1-based page number
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },

    /// Print the number of stored articles
    Count,

    /// Trigger a backend scrape
    Scrape {
        #[command(subcommand)]
        target: ScrapeTarget,
    },

    /// Delete every stored article
    DeleteAll {
        /// Required; there is no interactive confirmation here
        #[arg(long)]
        yes: bool,
    },

    /// Print the backend debug dump
    Debug,

    /// Print statistics, optionally exporting them as JSON
    Stats {
        /// Directory to write news-scraper-stats-YYYY-MM-DD.json into
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Print the local activity log
    Activity,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeTarget {
    /// Latest articles (first listing page)
    Latest,
    /// Every page
    All,
    /// One page, 1-10
    Page { page: u32 },
    /// Inclusive page range, 1-10
    Range { start: u32, end: u32 },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Tui)
    }
}
