//! Error types for Gulgle
//!
//! Validation and collision errors are the only ones shown to the user.
//! Storage errors are logged and recovered where they happen.

use std::path::PathBuf;

use thiserror::Error;

/// A rule broken by a single bang entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Trigger must not be empty")]
    EmptyTrigger,

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Domain must not be empty")]
    EmptyDomain,

    #[error("URL template must contain '%s'")]
    MissingPlaceholder,

    /// Carries the offending trigger.
    #[error("Trigger '{0}' may only contain letters and digits")]
    InvalidTriggerCharacters(String),
}

/// Errors returned when editing the custom catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Invalid bang: {0}")]
    Validation(#[from] ValidationError),

    /// `trigger` is the shared token, `existing` the primary trigger of the entry
    /// that already owns it.
    #[error("Trigger '{trigger}' is already used by custom bang '!{existing}'")]
    TriggerCollision { trigger: String, existing: String },
}

/// Failures while reading or writing a catalog file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur in Gulgle
#[derive(Debug, Error)]
pub enum GulgleError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Native messaging framing errors
    #[error("Host protocol error: {0}")]
    Protocol(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Gulgle operations
pub type GulgleResult<T> = Result<T, GulgleError>;
