//! GitHub REST adapter for retag.
//!
//! Exposes the [`RepoTopicsApi`] trait consumed by the tagger crate and a
//! reqwest-backed [`GithubClient`] implementing it.

mod client;
mod error;
mod types;

pub use client::GithubClient;
pub use error::{Error, Result};
pub use types::{Repository, SearchResponse, TopicList};

use async_trait::async_trait;

/// The three GitHub operations retag needs.
///
/// Implemented by [`GithubClient`] for production and by in-memory mocks in
/// tests, so nothing above this seam touches the network.
#[async_trait]
pub trait RepoTopicsApi: Send + Sync {
    /// Fetch one page of repositories in `org` carrying `topic`.
    ///
    /// `page` is 1-based. A page past the end of the result set returns an
    /// empty list, not an error.
    async fn search_repos_page(&self, org: &str, topic: &str, page: usize)
        -> Result<Vec<Repository>>;

    /// Fetch the current topic list of a repository (`owner/name`).
    async fn get_topics(&self, full_name: &str) -> Result<Vec<String>>;

    /// Replace the full topic list of a repository (`owner/name`).
    async fn set_topics(&self, full_name: &str, names: &[String]) -> Result<()>;
}
