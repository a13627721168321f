//! Error types for retag configuration

use thiserror::Error;

/// Error returned when a configuration value is unusable
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GitHub token is empty. Set --token or the GITHUB_TOKEN environment variable")]
    MissingToken,

    #[error("Organization name is empty")]
    MissingOrg,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
