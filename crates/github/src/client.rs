//! Reqwest-backed implementation of [`RepoTopicsApi`]

use crate::error::{Error, Result};
use crate::types::{Repository, SearchResponse, TopicList};
use crate::RepoTopicsApi;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use std::time::Duration;

const API_VERSION: &str = "2022-11-28";

/// Topics are invisible in search results without this media type.
const TOPICS_MEDIA_TYPE: &str = "application/vnd.github.mercy-preview+json";

const DEFAULT_USER_AGENT: &str = concat!("retag/", env!("CARGO_PKG_VERSION"));

/// GitHub REST client with bearer auth and a fixed per-request timeout
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    api_base: String,
    per_page: usize,
}

impl GithubClient {
    /// Build a client for the public GitHub API
    pub fn new(token: &str, timeout_secs: u64) -> Result<Self> {
        Self::with_api_base("https://api.github.com", token, timeout_secs)
    }

    /// Build a client from a run configuration
    pub fn from_config(config: &shared::RetagConfig) -> Result<Self> {
        let client = Self::with_api_base(&config.api_base, &config.token, config.timeout_secs)?;
        Ok(client.with_per_page(config.per_page))
    }

    /// Override the search page size (defaults to GitHub's maximum of 100)
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Build a client against an alternate base URL (GHES, test servers)
    pub fn with_api_base(api_base: impl Into<String>, token: &str, timeout_secs: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::InvalidHeader(e.to_string()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(TOPICS_MEDIA_TYPE));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            per_page: shared::DEFAULT_PER_PAGE,
        })
    }

    /// Map a non-success response into [`Error::Status`] with its body text
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl RepoTopicsApi for GithubClient {
    async fn search_repos_page(
        &self,
        org: &str,
        topic: &str,
        page: usize,
    ) -> Result<Vec<Repository>> {
        // The qualifiers stay one query parameter; reqwest percent-encodes
        // the whole value so odd characters in org/topic cannot break out.
        let query = format!("org:{org} topic:{topic}");
        tracing::debug!(target: "github", page, %query, "search request");

        let url = format!("{}/search/repositories", self.api_base);
        let response = self
            .client
            .get(url)
            .query(&[
                ("q", query.as_str()),
                ("page", &page.to_string()),
                ("per_page", &self.per_page.to_string()),
            ])
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body: SearchResponse = response.json().await?;
        tracing::debug!(target: "github", page, count = body.items.len(), "search response");
        Ok(body.items)
    }

    async fn get_topics(&self, full_name: &str) -> Result<Vec<String>> {
        let url = format!("{}/repos/{}/topics", self.api_base, full_name);
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        let body: TopicList = response.json().await?;
        Ok(body.names)
    }

    async fn set_topics(&self, full_name: &str, names: &[String]) -> Result<()> {
        // https://docs.github.com/en/rest/repos/repos#replace-all-repository-topics
        let url = format!("{}/repos/{}/topics", self.api_base, full_name);
        let body = TopicList {
            names: names.to_vec(),
        };
        let response = self.client.put(url).json(&body).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
