//! Tests for the `newsdesk` binary's command line.

mod common;

use common::articles_json;
use common::mock_backend::{MockBackend, MockResponse};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Command isolated from the user's config and state.
fn newsdesk_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_newsdesk"));
    cmd.env_remove("NEWSDESK_BASE_URL")
        .env_remove("NEWSDESK_LOG")
        .env("NEWSDESK_CONFIG", dir.path().join("config.toml"))
        .arg("--state")
        .arg(dir.path().join("state.json"));
    cmd
}

async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute command"))
        .await
        .unwrap()
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    let output = newsdesk_cmd(&dir).arg("--help").output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for command in ["list", "count", "scrape", "delete-all", "stats", "activity"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
    assert!(stdout.contains("--base-url"));
}

#[test]
fn test_unknown_sort_key_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = newsdesk_cmd(&dir)
        .args(["list", "--sort", "random"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown sort key 'random'"));
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = newsdesk_cmd(&dir)
        .args(["count", "--base-url", "localhost:8080"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid --base-url"));
}

/// Deleting needs --yes and sends nothing without it.
#[tokio::test(flavor = "multi_thread")]
async fn test_delete_all_requires_yes() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().unwrap();
    let mut cmd = newsdesk_cmd(&dir);
    cmd.args(["delete-all", "--base-url", backend.base_url().as_str()]);

    let output = run(cmd).await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--yes"));
    assert!(backend.captured_requests().await.is_empty());
}

/// `count` prints the backend total.
#[tokio::test(flavor = "multi_thread")]
async fn test_count_prints_total() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::json("17")).await;
    let dir = TempDir::new().unwrap();
    let mut cmd = newsdesk_cmd(&dir);
    cmd.env("NEWSDESK_BASE_URL", backend.base_url()).arg("count");

    let output = run(cmd).await;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Total articles in database: 17"
    );
}

/// `list` prints the requested page.
#[tokio::test(flavor = "multi_thread")]
async fn test_list_prints_requested_page() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(&articles_json(&common::numbered_articles(25))))
        .await;
    let dir = TempDir::new().unwrap();
    let mut cmd = newsdesk_cmd(&dir);
    cmd.args(["list", "--page", "3", "--base-url", backend.base_url().as_str()]);

    let output = run(cmd).await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Showing 21-25 of 25 (page 3 of 3, 25 total)"));
    assert!(stdout.contains("Article 25"));
    assert!(!stdout.contains("Article 20"));
}

/// A failing backend exits non-zero with the server's message.
#[tokio::test(flavor = "multi_thread")]
async fn test_backend_error_exits_nonzero() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::text(500, "Database unavailable"))
        .await;
    let dir = TempDir::new().unwrap();
    let mut cmd = newsdesk_cmd(&dir);
    cmd.args(["count", "--base-url", backend.base_url().as_str()]);

    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Database unavailable"));
}
