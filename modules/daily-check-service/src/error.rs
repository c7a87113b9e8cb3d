//! Error taxonomy for the store, repository and service layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DailyCheckError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] sled::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("invalid date {value:?}, expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("{0}")]
    InvalidInput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DailyCheckError {
    /// Caller mistakes, answered with 400 and never logged as failures.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, DailyCheckError>;
