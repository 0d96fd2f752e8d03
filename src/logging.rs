use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming the TUI log file.
pub const LOG_ENV_VAR: &str = "NEWSDESK_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Full-screen terminal UI: stdout and stderr belong to the display.
    Tui,
    /// One-shot command: logs go to stderr.
    Cli,
}

/// Initialize tracing for `mode`.
///
/// In TUI mode logging is disabled unless `NEWSDESK_LOG` names a file.
/// Log files get unique names so concurrent instances do not clash:
/// `{path}.{timestamp}.{pid}`
pub fn init_tracing(mode: LogMode) {
    match mode {
        LogMode::Tui => init_file_tracing(),
        LogMode::Cli => init_stderr_tracing(),
    }
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn init_file_tracing() {
    let Some(log_path) = std::env::var(LOG_ENV_VAR).ok() else {
        return;
    };

    let unique_path = unique_log_path(&log_path);
    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(filter("info"))
        .with(file_layer)
        .try_init();
}

fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("warn"))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

fn unique_log_path(base: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, pid)
}
