use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::article::Article;
use crate::config::ApiConfig;

pub const MIN_SCRAPE_PAGE: u32 = 1;
pub const MAX_SCRAPE_PAGE: u32 = 10;

/// Client for the articles resource of the backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    base_url: String,
}

impl NewsClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.get_json("").await
    }

    pub async fn count(&self) -> Result<u64, ApiError> {
        self.get_json("/count").await
    }

    /// Server's five most recent articles.
    pub async fn recent_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.get_json("/recent").await
    }

    pub async fn stats_text(&self) -> Result<String, ApiError> {
        self.text(Method::GET, "/stats").await
    }

    pub async fn debug_dump(&self) -> Result<String, ApiError> {
        self.text(Method::GET, "/debug").await
    }

    pub async fn delete_all(&self) -> Result<String, ApiError> {
        self.text(Method::DELETE, "").await
    }

    pub async fn scrape_latest(&self) -> Result<String, ApiError> {
        self.text(Method::POST, "/scrape").await
    }

    pub async fn scrape_all(&self) -> Result<String, ApiError> {
        self.text(Method::POST, "/scrape/all").await
    }

    /// Scrape a single listing page. Pages outside 1..=10 are rejected
    /// without contacting the backend.
    pub async fn scrape_page(&self, page: u32) -> Result<String, ApiError> {
        if !(MIN_SCRAPE_PAGE..=MAX_SCRAPE_PAGE).contains(&page) {
            return Err(ApiError::InvalidRequest(format!(
                "Page must be between {} and {}",
                MIN_SCRAPE_PAGE, MAX_SCRAPE_PAGE
            )));
        }
        self.text(Method::POST, &format!("/scrape/page/{}", page))
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: Method, path: &str) -> Result<Response, ApiError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "backend request");

        let response = self
            .client
            .request(method.clone(), &url)
            .send()
            .await
            .map_err(|source| {
                tracing::warn!(%method, %url, error = %source, "backend request failed");
                ApiError::Transport {
                    url: url.clone(),
                    source,
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%method, %url, status = status.as_u16(), body = %body, "backend returned error");
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let bytes = self
            .send(Method::GET, path)
            .await?
            .bytes()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(%url, error = %e, "failed to decode backend response");
            ApiError::Decode {
                url,
                message: e.to_string(),
            }
        })
    }

    async fn text(&self, method: Method, path: &str) -> Result<String, ApiError> {
        let url = self.url(path);
        self.send(method, path)
            .await?
            .text()
            .await
            .map_err(|source| ApiError::Transport { url, source })
    }
}
