// Error types for the catalog crate.
// Covers validation, missing items, data file failures, and client-side HTTP errors.

use thiserror::Error;

/// Message returned for any invalid create payload.
pub const INVALID_PAYLOAD: &str =
    "Invalid payload: name, category, and price (number, non-negative) are required";

/// Message returned for a non-positive or non-numeric `limit`/`page`.
pub const INVALID_PAGINATION: &str = "Invalid limit or page parameter";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    /// The data file could not be read, parsed, or written.
    #[error("{0}")]
    Storage(String),

    #[error("Catalog API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl CatalogError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
