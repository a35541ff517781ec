//! Error types for vitrine

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Key-value storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage IO error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage quota exceeded for '{key}': {len} bytes (quota {quota})")]
    QuotaExceeded { key: String, len: usize, quota: usize },
}

/// Rejected user input, one message per offending field
#[derive(Debug, Error)]
#[error("Invalid input: {}", .messages.join("; "))]
pub struct ValidationError {
    pub messages: Vec<String>,
}

impl ValidationError {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Item not found: {0}")]
    ItemNotFound(u64),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(u64),

    #[error("Duplicate item id in document: {0}")]
    DuplicateId(u64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
