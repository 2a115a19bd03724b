//! Domain-specific errors for the marketplace.
//!
//! Contains error variants for the request-level failure cases:
//! - Duplicate registration and bad payloads
//! - Bad credentials
//! - Role mismatch for an action
//! - Unknown listing or file
//!
//! Storage failures are kept separate: they are logged inside the store
//! layer and never reported to the caller.

use thiserror::Error;

/// A request failure, reported to the caller as an HTTP status plus a
/// `{message}` body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    /// Duplicate registration
    #[error("{0}")]
    Conflict(String),
    /// Bad credentials
    #[error("{0}")]
    Unauthorized(String),
    /// Role not permitted to perform the action
    #[error("{0}")]
    Forbidden(String),
    /// Unknown listing id or stored file
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    /// The HTTP status this error is reported with.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) | ApiError::Conflict(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
        }
    }
}

/// A persistence failure. Reads degrade to an empty collection, writes are
/// dropped; both are only visible in the logs.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: String,
        source: serde_json::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}
