//! Scraping jobs: validation, execution and bookkeeping.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::api::{ApiError, NewsClient, MAX_SCRAPE_PAGE, MIN_SCRAPE_PAGE};
use crate::storage::{local_timestamp, ActivityKind, SharedStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeJob {
    /// First listing page via `POST /scrape`.
    Latest,
    /// Every page the server knows about via `POST /scrape/all`.
    AllPages,
    Page(u32),
    /// Inclusive page range, scraped one page at a time.
    Range { start: u32, end: u32 },
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Please enter a valid page number (1-10), got '{input}'")]
    InvalidPage { input: String },

    #[error("Please enter valid page numbers (1-10, start <= end), got '{input}'")]
    InvalidRange { input: String },

    #[error("Failed to scrape page {page}: {source}")]
    PageFailed {
        page: u32,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ScrapeError {
    pub fn user_message(&self) -> String {
        match self {
            ScrapeError::PageFailed { page, .. } => format!("Failed to scrape page {}", page),
            ScrapeError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

fn valid_page(page: u32) -> bool {
    (MIN_SCRAPE_PAGE..=MAX_SCRAPE_PAGE).contains(&page)
}

impl ScrapeJob {
    pub fn page(page: u32) -> Result<Self, ScrapeError> {
        if !valid_page(page) {
            return Err(ScrapeError::InvalidPage {
                input: page.to_string(),
            });
        }
        Ok(ScrapeJob::Page(page))
    }

    pub fn range(start: u32, end: u32) -> Result<Self, ScrapeError> {
        if !valid_page(start) || !valid_page(end) || start > end {
            return Err(ScrapeError::InvalidRange {
                input: format!("{}-{}", start, end),
            });
        }
        Ok(ScrapeJob::Range { start, end })
    }

    /// Parses a page number typed at a prompt.
    pub fn parse_page(input: &str) -> Result<Self, ScrapeError> {
        let trimmed = input.trim();
        let page = trimmed.parse::<u32>().map_err(|_| ScrapeError::InvalidPage {
            input: trimmed.to_string(),
        })?;
        Self::page(page)
    }

    /// Parses `"A-B"` or `"A B"` typed at a prompt.
    pub fn parse_range(input: &str) -> Result<Self, ScrapeError> {
        let invalid = || ScrapeError::InvalidRange {
            input: input.trim().to_string(),
        };
        let mut parts = input
            .split(|c: char| c == '-' || c.is_whitespace())
            .filter(|part| !part.is_empty());
        let start = parts.next().ok_or_else(invalid)?;
        let end = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        let start = start.parse::<u32>().map_err(|_| invalid())?;
        let end = end.parse::<u32>().map_err(|_| invalid())?;
        Self::range(start, end).map_err(|_| invalid())
    }

    /// Number of backend requests the job makes.
    pub fn request_count(&self) -> u32 {
        match self {
            ScrapeJob::Range { start, end } => end - start + 1,
            _ => 1,
        }
    }

    /// Question to ask before running, for jobs that take a while.
    pub fn confirmation_prompt(&self) -> Option<String> {
        match self {
            ScrapeJob::AllPages => Some(format!(
                "This will scrape up to {} pages. This may take several minutes. Continue?",
                MAX_SCRAPE_PAGE
            )),
            ScrapeJob::Range { start, end } => Some(format!(
                "This will scrape pages {} to {}. Continue?",
                start, end
            )),
            _ => None,
        }
    }

    /// Entry written to the activity log on success.
    pub fn activity_message(&self) -> String {
        match self {
            ScrapeJob::Latest => "Scraped latest articles".to_string(),
            ScrapeJob::AllPages => "Scraped all pages".to_string(),
            ScrapeJob::Page(page) => format!("Scraped page {}", page),
            ScrapeJob::Range { start, end } => format!("Scraped pages {}-{}", start, end),
        }
    }

    pub fn start_message(&self) -> String {
        match self {
            ScrapeJob::Latest => "Scraping latest articles...".to_string(),
            ScrapeJob::AllPages => "Starting to scrape all pages...".to_string(),
            ScrapeJob::Page(page) => format!("Starting to scrape page {}...", page),
            ScrapeJob::Range { start, end } => {
                format!("Starting to scrape pages {} to {}...", start, end)
            }
        }
    }
}

impl fmt::Display for ScrapeJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeJob::Latest => f.write_str("latest"),
            ScrapeJob::AllPages => f.write_str("all pages"),
            ScrapeJob::Page(page) => write!(f, "page {}", page),
            ScrapeJob::Range { start, end } => write!(f, "pages {}-{}", start, end),
        }
    }
}

/// Progress of a running job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeProgress {
    pub completed: u32,
    pub total: u32,
    pub label: String,
}

impl ScrapeProgress {
    pub fn percent(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        ((u64::from(self.completed) * 100) / u64::from(self.total)) as u16
    }
}

/// Result of a successful job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOutcome {
    pub job: ScrapeJob,
    /// Status line text; the server's own message where it sends one.
    pub message: String,
}

/// Runs scrape jobs against the backend and records their success.
#[derive(Clone)]
pub struct ScrapeRunner {
    client: NewsClient,
    store: SharedStore,
    range_delay: Duration,
}

impl ScrapeRunner {
    pub fn new(client: NewsClient, store: SharedStore, range_delay: Duration) -> Self {
        Self {
            client,
            store,
            range_delay,
        }
    }

    /// Runs `job`, calling `on_progress` as pages complete.
    ///
    /// A range stops at the first failing page. Nothing is retried.
    pub async fn run<F>(&self, job: ScrapeJob, mut on_progress: F) -> Result<ScrapeOutcome, ScrapeError>
    where
        F: FnMut(ScrapeProgress),
    {
        tracing::info!(%job, "scrape started");
        on_progress(ScrapeProgress {
            completed: 0,
            total: job.request_count(),
            label: job.start_message(),
        });

        let result = match job {
            ScrapeJob::Latest => self
                .client
                .scrape_latest()
                .await
                .map(|_| "Latest articles scraped successfully!".to_string())
                .map_err(ScrapeError::from),
            ScrapeJob::AllPages => self.client.scrape_all().await.map_err(ScrapeError::from),
            ScrapeJob::Page(page) => self.client.scrape_page(page).await.map_err(ScrapeError::from),
            ScrapeJob::Range { start, end } => self.run_range(start, end, &mut on_progress).await,
        };

        match result {
            Ok(message) => {
                on_progress(ScrapeProgress {
                    completed: job.request_count(),
                    total: job.request_count(),
                    label: "Scraping completed successfully!".to_string(),
                });
                record_success(&self.store, &job);
                tracing::info!(%job, "scrape finished");
                Ok(ScrapeOutcome { job, message })
            }
            Err(e) => {
                on_progress(ScrapeProgress {
                    completed: 0,
                    total: job.request_count(),
                    label: "Scraping failed".to_string(),
                });
                tracing::warn!(%job, error = %e, "scrape failed");
                Err(e)
            }
        }
    }

    async fn run_range<F>(&self, start: u32, end: u32, on_progress: &mut F) -> Result<String, ScrapeError>
    where
        F: FnMut(ScrapeProgress),
    {
        let total = end - start + 1;
        for (completed, page) in (start..=end).enumerate() {
            let completed = completed as u32;
            on_progress(ScrapeProgress {
                completed,
                total,
                label: format!("Scraping page {} of {}...", page, end),
            });
            self.client
                .scrape_page(page)
                .await
                .map_err(|source| ScrapeError::PageFailed { page, source })?;
            on_progress(ScrapeProgress {
                completed: completed + 1,
                total,
                label: format!("Completed page {} of {}", page, end),
            });
            if page < end {
                tokio::time::sleep(self.range_delay).await;
            }
        }
        Ok(format!("Successfully scraped pages {} to {}", start, end))
    }
}

/// Sets `lastScraped` and logs the job. Storage failures are logged, not
/// returned: the scrape itself already succeeded.
pub fn record_success(store: &SharedStore, job: &ScrapeJob) {
    let mut store = store.lock();
    if let Err(e) = store.set_last_scraped(local_timestamp()) {
        tracing::warn!(error = %e, "failed to persist lastScraped");
    }
    if let Err(e) = store.add_activity(job.activity_message(), ActivityKind::Success) {
        tracing::warn!(error = %e, "failed to persist activity");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_are_enforced() {
        assert!(ScrapeJob::page(0).is_err());
        assert!(ScrapeJob::page(11).is_err());
        assert_eq!(ScrapeJob::page(1).unwrap(), ScrapeJob::Page(1));
        assert_eq!(ScrapeJob::page(10).unwrap(), ScrapeJob::Page(10));
    }

    #[test]
    fn parse_page_rejects_garbage() {
        assert!(ScrapeJob::parse_page("").is_err());
        assert!(ScrapeJob::parse_page("three").is_err());
        assert!(ScrapeJob::parse_page("-1").is_err());
        assert_eq!(ScrapeJob::parse_page(" 4 ").unwrap(), ScrapeJob::Page(4));
    }

    #[test]
    fn parse_range_accepts_dash_or_space() {
        let expected = ScrapeJob::Range { start: 2, end: 5 };
        assert_eq!(ScrapeJob::parse_range("2-5").unwrap(), expected);
        assert_eq!(ScrapeJob::parse_range("2 5").unwrap(), expected);
        assert_eq!(ScrapeJob::parse_range(" 2 - 5 ").unwrap(), expected);
    }

    #[test]
    fn parse_range_rejects_inverted_or_out_of_bounds() {
        for input in ["5-2", "0-3", "3-11", "3", "1-2-3", "a-b"] {
            assert!(ScrapeJob::parse_range(input).is_err(), "{input}");
        }
    }

    #[test]
    fn activity_messages() {
        assert_eq!(ScrapeJob::Latest.activity_message(), "Scraped latest articles");
        assert_eq!(ScrapeJob::AllPages.activity_message(), "Scraped all pages");
        assert_eq!(ScrapeJob::Page(3).activity_message(), "Scraped page 3");
        assert_eq!(
            ScrapeJob::Range { start: 2, end: 4 }.activity_message(),
            "Scraped pages 2-4"
        );
    }

    #[test]
    fn only_long_jobs_need_confirmation() {
        assert!(ScrapeJob::Latest.confirmation_prompt().is_none());
        assert!(ScrapeJob::Page(2).confirmation_prompt().is_none());
        assert!(ScrapeJob::AllPages.confirmation_prompt().is_some());
        assert!(ScrapeJob::Range { start: 1, end: 3 }
            .confirmation_prompt()
            .is_some());
    }

    #[test]
    fn progress_percent() {
        let progress = ScrapeProgress {
            completed: 1,
            total: 3,
            label: String::new(),
        };
        assert_eq!(progress.percent(), 33);
        let done = ScrapeProgress {
            completed: 3,
            total: 3,
            label: String::new(),
        };
        assert_eq!(done.percent(), 100);
    }
}
