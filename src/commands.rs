//! One-shot CLI commands.
//!
//! Each command talks to the backend once, prints a plain-text result and
//! exits. Output goes through `out` so tests can capture it.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;

use crate::api::NewsClient;
use crate::article::format_date;
use crate::cli::{Cli, Command, ScrapeTarget};
use crate::config::Config;
use crate::scrape::{ScrapeJob, ScrapeRunner};
use crate::stats::StatsSnapshot;
use crate::storage::{LocalStore, SharedStore};
use crate::ui::articles::{ArticleIntent, ArticleListState, ArticleReducer, SortKey};
use crate::ui::mvi::Reducer;

pub const EMPTY_LIST_MESSAGE: &str = "No articles found. Try scraping some articles first!";

/// Everything a command needs, built once from CLI flags and config.
pub struct Services {
    pub config: Config,
    pub client: NewsClient,
    pub store: SharedStore,
}

impl Services {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .context("Failed to load configuration")?;

        if let Some(base_url) = &cli.base_url {
            config = config
                .with_base_url(base_url.clone())
                .context("Invalid --base-url")?;
        }

        let state_path: PathBuf = cli
            .state
            .clone()
            .unwrap_or_else(|| LocalStore::resolve_path(&config.storage));

        Self::new(config, state_path)
    }

    pub fn new(config: Config, state_path: PathBuf) -> Result<Self> {
        let client = NewsClient::new(&config.api).context("Failed to build HTTP client")?;
        let mut store = LocalStore::open_or_default(state_path);
        if let Err(e) = store.ensure_app_start_time(Local::now().timestamp_millis()) {
            tracing::warn!(error = %e, "failed to record app start time");
        }
        let store = store.into_shared();
        Ok(Self {
            config,
            client,
            store,
        })
    }

    pub fn scrape_runner(&self) -> ScrapeRunner {
        ScrapeRunner::new(
            self.client.clone(),
            self.store.clone(),
            self.config.scrape.range_delay(),
        )
    }
}

/// Runs a non-interactive command. `Command::Tui` is handled by the caller.
pub async fn execute<W: Write>(command: &Command, services: &Services, out: &mut W) -> Result<()> {
    match command {
        Command::Tui => bail!("The TUI is not a one-shot command"),
        Command::List { search, sort, page } => list(services, search, *sort, *page, out).await,
        Command::Count => {
            let total = services.client.count().await?;
            writeln!(out, "Total articles in database: {}", total)?;
            Ok(())
        }
        Command::Scrape { target } => scrape(services, *target, out).await,
        Command::DeleteAll { yes } => {
            if !yes {
                bail!("Refusing to delete all articles without --yes");
            }
            let message = services.client.delete_all().await?;
            writeln!(out, "{}", message.trim())?;
            Ok(())
        }
        Command::Debug => {
            let dump = services.client.debug_dump().await?;
            writeln!(out, "{}", dump.trim_end())?;
            Ok(())
        }
        Command::Stats { export } => stats(services, export.as_deref(), out).await,
        Command::Activity => {
            let store = services.store.lock();
            if store.activities().is_empty() {
                writeln!(out, "No recent activity. Start scraping to see activity here!")?;
            }
            for activity in store.activities() {
                writeln!(
                    out,
                    "{}  {:<7}  {}",
                    activity.timestamp,
                    activity.kind.as_str(),
                    activity.message
                )?;
            }
            Ok(())
        }
    }
}

async fn list<W: Write>(
    services: &Services,
    search: &str,
    sort: Option<SortKey>,
    page: u32,
    out: &mut W,
) -> Result<()> {
    let articles = services.client.list_articles().await?;

    let mut intents = vec![
        ArticleIntent::Loaded { articles },
        ArticleIntent::Filter {
            term: search.to_string(),
        },
    ];
    if let Some(key) = sort {
        intents.push(ArticleIntent::Sort { key });
    }

    let state = intents.into_iter().fold(
        ArticleListState::with_page_size(services.config.ui.page_size),
        ArticleReducer::reduce,
    );
    // Past the end means the last page, as in the UI.
    let target = usize::try_from(page).unwrap_or(usize::MAX).min(state.total_pages());
    let state = (1..target)
        .map(|_| ArticleIntent::NextPage)
        .fold(state, ArticleReducer::reduce);

    if state.visible_set().is_empty() {
        writeln!(out, "{}", EMPTY_LIST_MESSAGE)?;
        return Ok(());
    }

    writeln!(
        out,
        "Showing {} (page {} of {}, {} total)",
        state.showing(),
        state.current_page(),
        state.total_pages(),
        state.total_count()
    )?;
    for article in state.page_slice() {
        writeln!(out)?;
        writeln!(out, "[{}] {}", article.id, article.display_title())?;
        if let Some(authors) = &article.authors {
            writeln!(out, "    Authors: {}", authors)?;
        }
        writeln!(out, "    Added: {}", format_date(article.created_at.as_deref()))?;
        if let Some(link) = &article.link {
            writeln!(out, "    {}", link)?;
        }
    }
    Ok(())
}

async fn scrape<W: Write>(services: &Services, target: ScrapeTarget, out: &mut W) -> Result<()> {
    let job = match target {
        ScrapeTarget::Latest => ScrapeJob::Latest,
        ScrapeTarget::All => ScrapeJob::AllPages,
        ScrapeTarget::Page { page } => ScrapeJob::page(page)?,
        ScrapeTarget::Range { start, end } => ScrapeJob::range(start, end)?,
    };

    let outcome = services
        .scrape_runner()
        .run(job, |progress| {
            eprintln!("[{:>3}%] {}", progress.percent(), progress.label);
        })
        .await?;
    writeln!(out, "{}", outcome.message.trim())?;
    Ok(())
}

async fn stats<W: Write>(
    services: &Services,
    export: Option<&std::path::Path>,
    out: &mut W,
) -> Result<()> {
    let snapshot = StatsSnapshot::collect(&services.client, &services.store).await;

    let overview = &snapshot.overview;
    writeln!(out, "Total articles:  {}", overview.total_articles)?;
    writeln!(out, "Pages scraped:   {}", overview.pages_scraped)?;
    writeln!(out, "Avg per page:    {}", overview.avg_per_page)?;
    writeln!(out, "Last scraped:    {}", overview.last_scraped)?;
    writeln!(out, "With description: {}", snapshot.distribution.with_description)?;
    writeln!(out, "With authors:     {}", snapshot.distribution.with_authors)?;
    writeln!(out, "With links:       {}", snapshot.distribution.with_links)?;
    writeln!(out, "Database:        {}", snapshot.db_status.label())?;
    writeln!(out, "Uptime:          {}", snapshot.uptime)?;
    if let Some(error) = &snapshot.articles_error {
        writeln!(out, "Articles unavailable: {}", error)?;
    }

    if let Some(dir) = export {
        let path = snapshot
            .to_export()
            .write_to(dir, Local::now().date_naive())
            .context("Failed to export statistics")?;
        writeln!(out, "Exported to {}", path.display())?;
    }
    Ok(())
}
