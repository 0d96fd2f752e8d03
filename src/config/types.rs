use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Articles resource base URL (e.g., "http://localhost:8080/api/news").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Articles per page (default: 10).
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Dashboard and article list refresh period (default: 30).
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
    /// Statistics view refresh period (default: 60).
    #[serde(default = "default_stats_refresh_interval")]
    pub stats_refresh_interval_seconds: u64,
    /// How long a status message stays visible (default: 5).
    #[serde(default = "default_status_ttl")]
    pub status_ttl_seconds: u64,
}

/// Scraping job settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Pause between pages of a range scrape (default: 1000).
    #[serde(default = "default_range_delay_ms")]
    pub range_delay_ms: u64,
}

/// Local state file location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the platform data directory when set.
    #[serde(default)]
    pub state_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/news".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_page_size() -> usize {
    10
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_stats_refresh_interval() -> u64 {
    60
}

fn default_status_ttl() -> u64 {
    5
}

fn default_range_delay_ms() -> u64 {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            refresh_interval_seconds: default_refresh_interval(),
            stats_refresh_interval_seconds: default_stats_refresh_interval(),
            status_ttl_seconds: default_status_ttl(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            range_delay_ms: default_range_delay_ms(),
        }
    }
}

impl UiConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds)
    }

    pub fn stats_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.stats_refresh_interval_seconds)
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_secs(self.status_ttl_seconds)
    }
}

impl ScrapeConfig {
    pub fn range_delay(&self) -> Duration {
        Duration::from_millis(self.range_delay_ms)
    }
}
