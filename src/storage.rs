//! Local key/value state that survives restarts.
//!
//! Stored as one JSON file with the keys `lastScraped`, `activities` and
//! `appStartTime`. Every mutation is written through immediately.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::StorageConfig;

/// Most activities kept; older entries are dropped.
pub const MAX_ACTIVITIES: usize = 20;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Store shared between the UI thread and background tasks.
pub type SharedStore = Arc<Mutex<LocalStore>>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access state file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse state file '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Info => "info",
            ActivityKind::Success => "success",
            ActivityKind::Warning => "warning",
            ActivityKind::Error => "error",
        }
    }
}

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Local time display string.
    pub timestamp: String,
}

impl Activity {
    pub fn now(message: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            message: message.into(),
            kind,
            timestamp: local_timestamp(),
        }
    }
}

/// Current local time in the format used for `lastScraped` and activities.
pub fn local_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredState {
    #[serde(default)]
    last_scraped: Option<String>,
    #[serde(default)]
    activities: Vec<Activity>,
    /// Epoch milliseconds.
    #[serde(default)]
    app_start_time: Option<i64>,
}

#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    state: StoredState,
}

impl LocalStore {
    /// `~/.local/share/newsdesk/state.json` or the platform equivalent.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("newsdesk").join("state.json")
    }

    /// Configured path with `~/` expanded, else [`Self::default_path`].
    pub fn resolve_path(config: &StorageConfig) -> PathBuf {
        match &config.state_path {
            Some(path) => expand_tilde(path),
            None => Self::default_path(),
        }
    }

    /// Opens the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| StorageError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoredState::default(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        Ok(Self { path, state })
    }

    /// Like [`Self::open`], but an unreadable file starts over empty.
    pub fn open_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(path.clone()) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable local state");
                Self {
                    path,
                    state: StoredState::default(),
                }
            }
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_scraped(&self) -> Option<&str> {
        self.state.last_scraped.as_deref()
    }

    /// Newest first.
    pub fn activities(&self) -> &[Activity] {
        &self.state.activities
    }

    pub fn app_start_time(&self) -> Option<i64> {
        self.state.app_start_time
    }

    pub fn set_last_scraped(&mut self, value: impl Into<String>) -> Result<(), StorageError> {
        self.state.last_scraped = Some(value.into());
        self.save()
    }

    /// Prepends `activity`, keeping at most [`MAX_ACTIVITIES`].
    pub fn push_activity(&mut self, activity: Activity) -> Result<(), StorageError> {
        self.state.activities.insert(0, activity);
        self.state.activities.truncate(MAX_ACTIVITIES);
        self.save()
    }

    pub fn add_activity(
        &mut self,
        message: impl Into<String>,
        kind: ActivityKind,
    ) -> Result<(), StorageError> {
        self.push_activity(Activity::now(message, kind))
    }

    /// Records `now_ms` as the start time unless one is already stored.
    /// Returns the stored value either way.
    pub fn ensure_app_start_time(&mut self, now_ms: i64) -> Result<i64, StorageError> {
        if let Some(existing) = self.state.app_start_time {
            return Ok(existing);
        }
        self.state.app_start_time = Some(now_ms);
        self.save()?;
        Ok(now_ms)
    }

    /// Writes to a sibling temp file, then renames over the target.
    pub fn save(&self) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.state).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
