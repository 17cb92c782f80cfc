//! Error types for terminology-client

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Terminology client errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Terminology service returned status {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },
}
