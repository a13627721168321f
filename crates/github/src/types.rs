//! Wire types for the GitHub endpoints retag calls

use serde::{Deserialize, Serialize};

/// One repository as returned by the search endpoint.
///
/// Only `full_name` is interpreted downstream; the rest rides along for
/// logging and future use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Fully qualified `owner/name`
    pub full_name: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub html_url: String,

    #[serde(default)]
    pub archived: bool,

    /// Topics as seen by the search index (requires the mercy-preview
    /// Accept header to be populated)
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Repository {
    /// Construct a record with just the fully qualified name
    pub fn from_full_name(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let name = full_name
            .rsplit_once('/')
            .map(|(_, n)| n.to_string())
            .unwrap_or_default();
        Self {
            full_name,
            name,
            html_url: String::new(),
            archived: false,
            topics: Vec::new(),
        }
    }
}

/// Body of `GET /search/repositories`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Total matches reported by the API. Deserialized but not used for
    /// pagination; page count comes from the configured estimate.
    #[serde(default)]
    pub total_count: usize,

    #[serde(default)]
    pub items: Vec<Repository>,
}

/// Body of both `GET` and `PUT` on `/repos/{full_name}/topics`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicList {
    #[serde(default)]
    pub names: Vec<String>,
}
