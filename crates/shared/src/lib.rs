//! Shared types for retag

mod config;
mod error;

pub use config::{
    RetagConfig, DEFAULT_API_BASE, DEFAULT_CONCURRENCY, DEFAULT_ESTIMATED_TOTAL,
    DEFAULT_LEGACY_TOPIC, DEFAULT_PER_PAGE, DEFAULT_TIMEOUT_SECS,
};
pub use error::{ConfigError, Result};
