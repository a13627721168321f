//! Configuration for a retag run

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Default GitHub REST API base URL
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default topic applied to matching repositories
pub const DEFAULT_LEGACY_TOPIC: &str = "legacy";

/// Assumed total number of search results driving pagination.
/// The search API's own total count is never consulted.
pub const DEFAULT_ESTIMATED_TOTAL: usize = 32_000;

/// Search results requested per page (GitHub's maximum)
pub const DEFAULT_PER_PAGE: usize = 100;

/// Maximum simultaneous in-flight page fetches
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for one retag run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetagConfig {
    /// GitHub bearer token
    pub token: String,

    /// Organization to search
    pub org_name: String,

    /// Topic applied to each matching repository
    #[serde(default = "default_legacy_topic")]
    pub legacy_topic: String,

    /// API base URL (overridable for tests)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Assumed total search result count
    #[serde(default = "default_estimated_total")]
    pub estimated_total: usize,

    /// Results per search page
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Page-fetch worker pool size
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_legacy_topic() -> String {
    DEFAULT_LEGACY_TOPIC.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_estimated_total() -> usize {
    DEFAULT_ESTIMATED_TOTAL
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl RetagConfig {
    /// Create a configuration with defaults for everything but the credentials
    pub fn new(token: impl Into<String>, org_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            org_name: org_name.into(),
            legacy_topic: default_legacy_topic(),
            api_base: default_api_base(),
            estimated_total: default_estimated_total(),
            per_page: default_per_page(),
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Number of search pages needed to cover the estimated total.
    ///
    /// Always at least 1, so an estimate of zero still fetches one page.
    pub fn total_pages(&self) -> usize {
        let per_page = self.per_page.max(1);
        (self.estimated_total / per_page + usize::from(self.estimated_total % per_page != 0)).max(1)
    }

    /// Validate the configuration before a run
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if self.org_name.trim().is_empty() {
            return Err(ConfigError::MissingOrg);
        }
        if self.per_page == 0 {
            return Err(ConfigError::Invalid("per_page must be positive".to_string()));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be positive".to_string()));
        }
        Ok(())
    }
}
