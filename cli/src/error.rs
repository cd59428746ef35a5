//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the BFD changer
#[derive(Error, Debug)]
pub enum Error {
    /// Non-success status returned by the controller
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login or token validation failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Cannot read auth token file {path}: {source}")]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Terminal interaction failed
    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("No WAN interfaces matched '{0}'")]
    NoMatches(String),
}

impl Error {
    /// Returns true if the controller rejected our credentials (401/403)
    pub fn is_authentication_error(&self) -> bool {
        matches!(self, Error::Auth(_) | Error::Api { status: 401 | 403, .. })
    }

    /// Returns true if this is a not found error (404)
    pub fn is_not_found_error(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }
}
