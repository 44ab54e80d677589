use crate::error::{RepoPinError, Result};
use crate::models::RepositoryHit;
use crate::types::{SearchEnvelope, SearchItem};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
pub const SEARCH_PATH: &str = "search/repositories";
/// Only the head of the first page is ever shown
pub const MAX_CANDIDATES: usize = 5;

#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SearchClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("repo-pin/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Where the search pipeline gets its hits from
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Runs one search. Errors are returned, never swallowed, so the caller
    /// decides what a failure looks like on screen.
    async fn search(&self, query: &str) -> Result<Vec<RepositoryHit>>;
}

pub struct GitHubClient {
    client: Client,
    search_url: Url,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::with_config(SearchClientConfig::default())
    }

    pub fn with_config(config: SearchClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(GitHubClient {
            client,
            search_url: search_url(&config.base_url)?,
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    async fn make_request(&self, query: &str) -> Result<Response> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair("q", query);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let rate_limit_remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        let rate_limit_reset = response
            .headers()
            .get("X-RateLimit-Reset")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok());

        let limited = matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS)
            && rate_limit_remaining == Some(0);
        if limited {
            let reset = rate_limit_reset
                .and_then(|ts| DateTime::from_timestamp(ts, 0))
                .map(|at| format!("resets at {}", at.to_rfc3339()))
                .unwrap_or_else(|| "reset time unknown".to_string());
            return Err(RepoPinError::RateLimited(format!(
                "search quota exhausted, {}",
                reset
            )));
        }

        let body = response.text().await.unwrap_or_default();
        Err(RepoPinError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Fetches the first page for `query` and keeps its first
    /// [`MAX_CANDIDATES`] items in response order.
    pub async fn search_repositories(&self, query: &str) -> Result<Vec<RepositoryHit>> {
        let response = self.make_request(query).await?;
        let body = response.text().await?;
        let hits = parse_search_body(&body)?;
        debug!(query = %query, hits = hits.len(), "Search request completed");
        Ok(hits)
    }
}

#[async_trait]
impl SearchBackend for GitHubClient {
    async fn search(&self, query: &str) -> Result<Vec<RepositoryHit>> {
        self.search_repositories(query).await
    }
}

/// Resolves the search endpoint under `base`, keeping any path prefix
/// (`https://host/api/v3` becomes `https://host/api/v3/search/repositories`).
pub fn search_url(base: &str) -> Result<Url> {
    let mut base = Url::parse(base)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(SEARCH_PATH)?)
}

pub fn parse_search_body(body: &str) -> Result<Vec<RepositoryHit>> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;
    envelope
        .items
        .into_iter()
        .take(MAX_CANDIDATES)
        .map(|item| -> Result<RepositoryHit> {
            let item: SearchItem = serde_json::from_value(item)?;
            Ok(RepositoryHit::from(item))
        })
        .collect()
}

/// Collapses a failed search into "no hits", logging the reason.
///
/// The UI cannot tell a failure from an empty result; this is the one place
/// that decision is made.
pub fn hits_or_empty(query: &str, outcome: Result<Vec<RepositoryHit>>) -> Vec<RepositoryHit> {
    match outcome {
        Ok(hits) => hits,
        Err(e) => {
            error!(query = %query, "Error fetching search results: {}", e);
            Vec::new()
        }
    }
}

/// Runs a search and never fails: any error yields an empty list.
pub async fn fetch_search_results(backend: &dyn SearchBackend, query: &str) -> Vec<RepositoryHit> {
    hits_or_empty(query, backend.search(query).await)
}
