//! Application error types.

use thiserror::Error;

/// Application-level errors for the dataset register.
#[derive(Error, Debug)]
pub enum AppError {
    // Harvest errors
    #[error("HTTP error {status_code}: {message}")]
    Http { status_code: u16, message: String },

    #[error("No dataset found at URL: {0}")]
    NoDatasetFound(String),

    #[error("Node id collision: {first} and {second} map to the same node")]
    NodeIdCollision { first: String, second: String },

    // Store errors
    #[error("Could not authenticate username {username} with the triplestore; got status code {status}")]
    Authentication { username: String, status: u16 },

    #[error("Store request {method} {url} failed with status {status}")]
    Store {
        method: String,
        url: String,
        status: u16,
    },

    #[error("Store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed query results: {0}")]
    Results(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // Registration errors
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the source HTTP status code for harvest failures, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
