//! Application layer errors.
//!
//! These errors represent failures in orchestration and persistence, not
//! business rules. Business rule errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::RecordId;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No stored medication has this id.
    #[error("Medication {id} not found")]
    RecordNotFound { id: RecordId },

    /// A medication with this id is already stored.
    #[error("Medication {id} already exists")]
    RecordExists { id: RecordId },

    /// Store access failed (lock poisoned, etc.).
    #[error("Medication store error")]
    StoreLockError,

    /// Reading or writing the backing file failed.
    #[error("Storage error at {path}: {reason}")]
    StorageFailed { path: PathBuf, reason: String },

    /// Stored data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The action plan backend could not provide or create a plan.
    #[error("Action plan unavailable: {reason}")]
    ActionPlanUnavailable { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RecordNotFound { .. } => vec![
                "List stored medications with: medtrack list".into(),
            ],
            Self::RecordExists { id } => vec![
                format!("Edit it instead: medtrack edit {}", id),
            ],
            Self::StorageFailed { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Point to another file with --store or MEDTRACK__STORAGE__PATH".into(),
            ],
            Self::Serialization(_) => vec![
                "The medication store may be corrupted".into(),
                "Move the file aside and run the command again".into(),
            ],
            Self::StoreLockError => vec![
                "The medication store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::ActionPlanUnavailable { .. } => vec![
                "Check application.id in your configuration".into(),
            ],
            Self::ValidationFailed(_) => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RecordNotFound { .. } => ErrorCategory::NotFound,
            Self::RecordExists { .. } | Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::StorageFailed { .. } | Self::Serialization(_) | Self::StoreLockError => {
                ErrorCategory::Internal
            }
            Self::ActionPlanUnavailable { .. } => ErrorCategory::Configuration,
        }
    }
}
