//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use newsdesk::api::NewsClient;
use newsdesk::article::Article;
use newsdesk::config::{ApiConfig, Config};
use newsdesk::storage::{LocalStore, SharedStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// Resource path the backend serves articles under.
pub const ARTICLES_PATH: &str = "/api/news";

/// Config pointing at `base_url` with short timeouts.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    };
    config
}

pub fn client_for(base_url: &str) -> NewsClient {
    NewsClient::new(&test_config(base_url).api).expect("Failed to build client")
}

/// Empty store in a fresh temp dir. Keep the `TempDir` alive for the test.
pub fn temp_store() -> (TempDir, SharedStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = LocalStore::open(temp_dir.path().join("state.json"))
        .expect("Failed to open store")
        .into_shared();
    (temp_dir, store)
}

/// Write `content` to `config.toml` in a temp dir.
pub fn temp_config_file(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Article fixtures ---------------------------------------------------------

pub fn article(id: i64, title: &str, created_at: &str) -> Article {
    Article {
        id,
        title: Some(title.to_string()),
        link: Some(format!("https://news.example.com/{}", id)),
        description: Some(format!("Description of {}", title)),
        authors: Some("Jane Doe".to_string()),
        created_at: Some(created_at.to_string()),
    }
}

/// `count` articles numbered from 1, one day apart, oldest first.
pub fn numbered_articles(count: usize) -> Vec<Article> {
    (1..=count)
        .map(|i| {
            article(
                i as i64,
                &format!("Article {:02}", i),
                &format!("2024-01-{:02}T10:00:00Z", i),
            )
        })
        .collect()
}

/// Backend JSON for `articles`, using the camelCase field names.
pub fn articles_json(articles: &[Article]) -> String {
    let values: Vec<serde_json::Value> = articles
        .iter()
        .map(|a| {
            serde_json::json!({
                "id": a.id,
                "title": a.title,
                "link": a.link,
                "description": a.description,
                "authors": a.authors,
                "createdAt": a.created_at,
            })
        })
        .collect();
    serde_json::Value::Array(values).to_string()
}
