//! Error types for Hookcat
//!
//! This module provides the error type hierarchy using `thiserror`
//! for proper error handling across all components.

use thiserror::Error;

/// The main error type for Hookcat operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Provider API errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Catalog store errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Run configuration errors
///
/// Raised before any network activity; the message identifies the missing
/// or invalid setting.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No catalog directory configured
    #[error("Missing catalog directory (--dir or HOOKCAT_CATALOG_DIR)")]
    MissingCatalogDir,

    /// No provider credential configured
    #[error("Missing provider API key (--api-key or HOOKCAT_API_KEY)")]
    MissingApiKey,

    /// The connection source match pattern does not compile
    #[error("Invalid connection source match pattern {pattern:?}: {message}")]
    InvalidMatchPattern {
        /// The pattern as supplied
        pattern: String,
        /// Regex compile error
        message: String,
    },
}

/// Provider API errors
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Non-success HTTP status from the provider
    #[error("Provider returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// Connection-level failure talking to the provider
    #[error("Provider transport error: {0}")]
    Transport(String),

    /// A record id was returned twice within one entity's pagination.
    /// Pagination correctness is assumed, so this aborts the run.
    #[error("Duplicate record {record_id} while paginating {entity_id}")]
    DuplicateRecord {
        /// The repeated record id
        record_id: String,
        /// The source or destination being paginated
        entity_id: String,
    },

    /// A request detail response carried no payload body.
    /// Request bodies are assumed always present.
    #[error("Request {record_id} for source {source_id} has no payload body")]
    MissingRequestBody {
        /// The request record id
        record_id: String,
        /// The owning source id
        source_id: String,
    },
}

/// Catalog store errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Underlying store failure
    #[error("Catalog store failure: {0}")]
    Store(String),

    /// A document on disk could not be decoded
    #[error("Corrupt catalog document at {path}: {message}")]
    CorruptDocument {
        /// Path of the offending document
        path: String,
        /// Decode error
        message: String,
    },
}

/// Result type alias for Hookcat operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a generic error from a string
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        Error::Generic(msg.into())
    }
}

/// Convert reqwest errors
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Provider(ProviderError::Transport(err.to_string()))
    }
}
