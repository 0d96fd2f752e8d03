//! Numbers for the dashboard and statistics views.
//!
//! Everything here is derived from the `/count` endpoint, the article list
//! and the local store. Nothing is cached between refreshes.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration as ChronoDuration, Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::api::NewsClient;
use crate::article::{format_date, Article};
use crate::storage::{local_timestamp, SharedStore, StorageError};

/// Rough number of articles on one listing page of the source site.
pub const ARTICLES_PER_SOURCE_PAGE: u64 = 20;

pub const RECENT_PREVIEW_LEN: usize = 5;
pub const PREVIEW_TITLE_CHARS: usize = 60;
pub const PREVIEW_DESCRIPTION_CHARS: usize = 100;
pub const CHART_DAYS: i64 = 7;
/// Smallest bar height, in percent of the chart.
pub const MIN_BAR_HEIGHT: u16 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub total_articles: u64,
    pub pages_scraped: u64,
    pub avg_per_page: u64,
    /// `"-"` until the first successful scrape.
    pub last_scraped: String,
}

impl Overview {
    pub fn new(total_articles: u64, last_scraped: Option<&str>) -> Self {
        let pages_scraped = total_articles.div_ceil(ARTICLES_PER_SOURCE_PAGE);
        let avg_per_page = if total_articles > 0 {
            (total_articles as f64 / pages_scraped as f64).round() as u64
        } else {
            0
        };
        Self {
            total_articles,
            pages_scraped,
            avg_per_page,
            last_scraped: last_scraped.unwrap_or("-").to_string(),
        }
    }

    /// Dashboard system status.
    pub fn status_label(&self) -> &'static str {
        if self.total_articles > 0 {
            "Active"
        } else {
            "Ready"
        }
    }
}

/// How many articles carry each optional field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Distribution {
    pub with_description: usize,
    pub with_authors: usize,
    pub with_links: usize,
}

impl Distribution {
    pub fn from_articles(articles: &[Article]) -> Self {
        let count = |field: fn(&Article) -> Option<&String>| {
            articles
                .iter()
                .filter(|a| field(a).is_some_and(|s| !s.trim().is_empty()))
                .count()
        };
        Self {
            with_description: count(|a| a.description.as_ref()),
            with_authors: count(|a| a.authors.as_ref()),
            with_links: count(|a| a.link.as_ref()),
        }
    }
}

/// One row of the dashboard's recent articles panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlePreview {
    pub title: String,
    pub link: Option<String>,
    pub description: String,
    pub authors: String,
    pub created: String,
}

impl ArticlePreview {
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: truncate_text(article.display_title(), PREVIEW_TITLE_CHARS),
            link: article.link.clone(),
            description: article
                .description
                .as_deref()
                .map(|d| truncate_text(d, PREVIEW_DESCRIPTION_CHARS))
                .unwrap_or_else(|| "No description available".to_string()),
            authors: article
                .authors
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            created: format_date(article.created_at.as_deref()),
        }
    }
}

/// The first few articles in server order.
pub fn recent_previews(articles: &[Article]) -> Vec<ArticlePreview> {
    articles
        .iter()
        .take(RECENT_PREVIEW_LEN)
        .map(ArticlePreview::from_article)
        .collect()
}

/// Cuts `text` to `max` characters, marking the cut with `...`.
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push_str("...");
    cut
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartBar {
    pub date: NaiveDate,
    pub count: usize,
    /// 20..=100
    pub height: u16,
}

/// Articles per day for the seven days ending `today`, in `tz`.
///
/// Bars are scaled against the busiest day over all dates, not only the
/// ones shown. Articles without a usable `createdAt` are skipped. An empty
/// article list yields no bars.
pub fn activity_chart_in<Tz: TimeZone>(articles: &[Article], today: NaiveDate, tz: &Tz) -> Vec<ChartBar> {
    if articles.is_empty() {
        return Vec::new();
    }

    let mut by_date = std::collections::BTreeMap::<NaiveDate, usize>::new();
    for date in articles
        .iter()
        .filter_map(|a| a.created_at_in(tz))
        .map(|dt| dt.date_naive())
    {
        *by_date.entry(date).or_default() += 1;
    }
    let busiest = by_date.values().copied().max().unwrap_or(0);

    (0..CHART_DAYS)
        .rev()
        .map(|days_ago| {
            let date = today - ChronoDuration::days(days_ago);
            let count = by_date.get(&date).copied().unwrap_or(0);
            let height = if count > 0 && busiest > 0 {
                let scaled = (count as f64 / busiest as f64 * 100.0).round() as u16;
                scaled.max(MIN_BAR_HEIGHT)
            } else {
                MIN_BAR_HEIGHT
            };
            ChartBar { date, count, height }
        })
        .collect()
}

/// [`activity_chart_in`] for the local time zone and today's date.
pub fn activity_chart(articles: &[Article]) -> Vec<ChartBar> {
    activity_chart_in(articles, Local::now().date_naive(), &Local)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbStatus {
    Connected,
    Error,
}

impl DbStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DbStatus::Connected => "Connected",
            DbStatus::Error => "Error",
        }
    }
}

/// `"{h}h {m}m"`. Negative spans render as zero.
pub fn format_uptime(elapsed_ms: i64) -> String {
    let elapsed_ms = elapsed_ms.max(0);
    let hours = elapsed_ms / 3_600_000;
    let minutes = (elapsed_ms % 3_600_000) / 60_000;
    format!("{}h {}m", hours, minutes)
}

/// Everything the statistics view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub overview: Overview,
    pub distribution: Distribution,
    pub chart: Vec<ChartBar>,
    pub db_status: DbStatus,
    pub uptime: String,
    /// Set when the article list could not be fetched.
    pub articles_error: Option<String>,
}

impl StatsSnapshot {
    /// Builds a snapshot from the backend and the local store.
    ///
    /// Partial failures degrade the snapshot rather than failing it: a
    /// failed count reports the database as down, a failed list leaves the
    /// distribution and chart empty.
    pub async fn collect(client: &NewsClient, store: &SharedStore) -> Self {
        let (count, articles) = tokio::join!(client.count(), client.list_articles());
        let (last_scraped, start_ms) = {
            let store = store.lock();
            (store.last_scraped().map(str::to_string), store.app_start_time())
        };
        let now_ms = Local::now().timestamp_millis();

        let (total, db_status) = match count {
            Ok(total) => (total, DbStatus::Connected),
            Err(_) => (0, DbStatus::Error),
        };
        let (articles, articles_error) = match articles {
            Ok(articles) => (articles, None),
            Err(e) => (Vec::new(), Some(e.user_message())),
        };

        Self {
            overview: Overview::new(total, last_scraped.as_deref()),
            distribution: Distribution::from_articles(&articles),
            chart: activity_chart(&articles),
            db_status,
            uptime: format_uptime(now_ms - start_ms.unwrap_or(now_ms)),
            articles_error,
        }
    }

    pub fn to_export(&self) -> StatsExport {
        StatsExport {
            total_articles: self.overview.total_articles,
            pages_scraped: self.overview.pages_scraped,
            last_scraped: self.overview.last_scraped.clone(),
            avg_per_page: self.overview.avg_per_page,
            with_description: self.distribution.with_description,
            with_authors: self.distribution.with_authors,
            with_links: self.distribution.with_links,
            export_date: local_timestamp(),
        }
    }
}

/// Exported statistics file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsExport {
    pub total_articles: u64,
    pub pages_scraped: u64,
    pub last_scraped: String,
    pub avg_per_page: u64,
    pub with_description: usize,
    pub with_authors: usize,
    pub with_links: usize,
    pub export_date: String,
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("news-scraper-stats-{}.json", date.format("%Y-%m-%d"))
}

impl StatsExport {
    /// Writes pretty JSON into `dir` under [`export_file_name`] for `date`.
    pub fn write_to(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf, StorageError> {
        let path = dir.join(export_file_name(date));
        let json = serde_json::to_string_pretty(self).map_err(|source| StorageError::Json {
            path: path.clone(),
            source,
        })?;
        fs::create_dir_all(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
