//! Error types for the GitHub adapter

use thiserror::Error;

/// Error returned by GitHub API calls
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure: connection refused, DNS, timeout
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("GitHub returned {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    /// Token or user agent contains bytes a header cannot carry
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// Client-side failure with no HTTP exchange behind it
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// True for timeouts and connection-level failures
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Status code if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
