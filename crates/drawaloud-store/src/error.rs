//! Store error types.
//!
//! Every store failure is recoverable: the in-memory session stays the source
//! of truth until a later write succeeds.

use std::path::PathBuf;
use thiserror::Error;

/// Response store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The medium refused the write because it would exceed its quota.
    #[error("Storage quota exceeded writing {key}: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// The stored value is not a valid response mapping.
    #[error("Stored responses under {key} are corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    /// Serialization error.
    #[error("Failed to serialize responses")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save your responses to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::QuotaExceeded { .. } => {
                "Your latest changes could not be saved because storage is full. \
                 They are kept until the session ends."
                    .to_string()
            }
            Self::Corrupt { .. } => {
                "Previously saved responses could not be read and were discarded.".to_string()
            }
            Self::Serialization { .. } => {
                "An error occurred while preparing your responses for saving.".to_string()
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that you have permission to read the storage directory.".into())
                } else {
                    Some("Check that you have permission to write to the storage directory.".into())
                }
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different storage directory.".into())
            }
            Self::QuotaExceeded { .. } => {
                Some("Export your responses now, then clear older drawings.".into())
            }
            Self::Corrupt { .. } => {
                Some("The next save overwrites the damaged value.".into())
            }
            Self::Serialization { .. } => None,
        }
    }

    /// True for write failures caused by the medium rather than the data.
    pub fn is_write_failure(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::AtomicWriteFailed { .. } | Self::QuotaExceeded { .. }
        )
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
