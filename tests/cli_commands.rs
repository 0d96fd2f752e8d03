//! Tests for the one-shot commands, with output captured in memory.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{article, articles_json, numbered_articles, test_config};
use newsdesk::cli::{Command, ScrapeTarget};
use newsdesk::commands::{execute, Services, EMPTY_LIST_MESSAGE};
use newsdesk::storage::ActivityKind;
use newsdesk::ui::articles::SortKey;
use tempfile::TempDir;

fn services(backend: &MockBackend, dir: &TempDir) -> Services {
    Services::new(test_config(&backend.base_url()), dir.path().join("state.json")).unwrap()
}

async fn output(command: Command, services: &Services) -> anyhow::Result<String> {
    let mut out = Vec::new();
    execute(&command, services, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

/// An empty backend prints the empty-state hint.
#[tokio::test]
async fn test_list_empty_prints_hint() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::json("[]")).await;
    let dir = TempDir::new().unwrap();

    let text = output(
        Command::List {
            search: String::new(),
            sort: None,
            page: 1,
        },
        &services(&backend, &dir),
    )
    .await
    .unwrap();

    assert_eq!(text.trim(), EMPTY_LIST_MESSAGE);
}

/// Search and sort apply before paging.
#[tokio::test]
async fn test_list_filters_and_sorts() {
    let backend = MockBackend::start().await;
    let articles = vec![
        article(1, "Solar farms expand", "2024-01-01T00:00:00Z"),
        article(2, "Wind turbines", "2024-01-02T00:00:00Z"),
        article(3, "Solar panel prices", "2024-01-03T00:00:00Z"),
    ];
    backend
        .enqueue_response(MockResponse::json(&articles_json(&articles)))
        .await;
    let dir = TempDir::new().unwrap();

    let text = output(
        Command::List {
            search: "SOLAR".into(),
            sort: Some(SortKey::Newest),
            page: 1,
        },
        &services(&backend, &dir),
    )
    .await
    .unwrap();

    assert!(text.starts_with("Showing 1-2 of 2"));
    let panel = text.find("Solar panel prices").unwrap();
    let farms = text.find("Solar farms expand").unwrap();
    assert!(panel < farms);
    assert!(!text.contains("Wind turbines"));
}

/// A page number far past the end prints the last page.
#[tokio::test]
async fn test_list_huge_page_shows_last_page() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(&articles_json(&numbered_articles(25))))
        .await;
    let dir = TempDir::new().unwrap();

    let text = output(
        Command::List {
            search: String::new(),
            sort: None,
            page: u32::MAX,
        },
        &services(&backend, &dir),
    )
    .await
    .unwrap();

    assert!(text.starts_with("Showing 21-25 of 25 (page 3 of 3"), "{text}");
    assert!(text.contains("Article 25"));
    assert!(!text.contains("Article 20"));
}

/// A scrape logs an activity the `activity` command then prints.
#[tokio::test]
async fn test_scrape_then_activity() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::text(200, "Page 2 scraped"))
        .await;
    let dir = TempDir::new().unwrap();
    let services = services(&backend, &dir);

    let text = output(
        Command::Scrape {
            target: ScrapeTarget::Page { page: 2 },
        },
        &services,
    )
    .await
    .unwrap();
    assert_eq!(text.trim(), "Page 2 scraped");

    let activity = output(Command::Activity, &services).await.unwrap();
    assert!(activity.contains("success"));
    assert!(activity.contains("Scraped page 2"));
    assert_eq!(
        services.store.lock().activities()[0].kind,
        ActivityKind::Success
    );
}

/// Out-of-range pages fail before any request.
#[tokio::test]
async fn test_scrape_invalid_page_sends_nothing() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().unwrap();

    let result = output(
        Command::Scrape {
            target: ScrapeTarget::Range { start: 4, end: 12 },
        },
        &services(&backend, &dir),
    )
    .await;

    assert!(result.is_err());
    assert!(backend.captured_requests().await.is_empty());
}

/// With an empty log, `activity` says so.
#[tokio::test]
async fn test_activity_empty() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().unwrap();

    let text = output(Command::Activity, &services(&backend, &dir)).await.unwrap();

    assert!(text.contains("No recent activity"));
}

/// Statistics degrade when the backend is down and still export.
#[tokio::test]
async fn test_stats_degrade_and_export() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::text(500, "down")).await;
    backend.enqueue_response(MockResponse::text(500, "down")).await;
    let dir = TempDir::new().unwrap();
    let export_dir = dir.path().join("exports");

    let text = output(
        Command::Stats {
            export: Some(export_dir.clone()),
        },
        &services(&backend, &dir),
    )
    .await
    .unwrap();

    assert!(text.contains("Database:        Error"));
    assert!(text.contains("Articles unavailable: down"));

    let exported: Vec<_> = std::fs::read_dir(&export_dir).unwrap().collect();
    assert_eq!(exported.len(), 1);
    let path = exported[0].as_ref().unwrap().path();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("news-scraper-stats-") && name.ends_with(".json"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["totalArticles"], 0);
    assert_eq!(json["lastScraped"], "-");
    assert!(json["exportDate"].is_string());
}

/// Delete-all with --yes prints the server message.
#[tokio::test]
async fn test_delete_all_with_yes() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::text(200, "All articles deleted"))
        .await;
    let dir = TempDir::new().unwrap();

    let text = output(Command::DeleteAll { yes: true }, &services(&backend, &dir))
        .await
        .unwrap();

    assert_eq!(text.trim(), "All articles deleted");
    assert_eq!(backend.captured_requests().await[0].method, "DELETE");
}
