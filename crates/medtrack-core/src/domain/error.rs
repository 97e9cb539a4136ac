// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Ordinary invalid user input never reaches this type: field validation and
/// the record builder report it as a plain `bool`. These variants cover the
/// places where a caller asked for a `Result` explicitly.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Unknown unit '{unit}' for vocabulary '{vocabulary}'")]
    UnknownUnit { unit: String, vocabulary: String },

    #[error("Unknown unit vocabulary: {0}")]
    UnknownVocabulary(String),

    #[error("Invalid record id '{0}'")]
    InvalidRecordId(String),

    #[error("'{value}' is not a valid choice for {field}")]
    InvalidChoice { field: String, value: String },

    #[error("Form rejected, invalid fields: {}", .fields.join(", "))]
    FormRejected { fields: Vec<String> },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Medication builder used before a record was attached")]
    BuilderUnbound,

    #[error("Action plan task is incomplete, missing: {}", .missing.join(", "))]
    IncompleteActionPlanTask { missing: Vec<&'static str> },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidMeasurement(msg) => vec![
                "Amounts must be plain decimal numbers, e.g. 2 or 12.5".into(),
                format!("Details: {}", msg),
            ],
            Self::UnknownUnit { vocabulary, .. } => vec![
                format!("List the accepted units with: medtrack units {}", vocabulary),
            ],
            Self::InvalidRecordId(id) => vec![
                format!("'{}' is not a record id", id),
                "List stored records and their ids with: medtrack list".into(),
            ],
            Self::UnknownVocabulary(_) => vec![
                "Known vocabularies: dose, strength, frequency".into(),
            ],
            Self::InvalidChoice { field, .. } => vec![
                format!("Pick one of the listed values for {}", field),
                "Try: medtrack units".into(),
            ],
            Self::FormRejected { fields } => {
                let mut out = vec!["Fix the following fields and submit again:".to_string()];
                out.extend(fields.iter().map(|f| format!("  • {}", f)));
                out
            }
            Self::IncompleteActionPlanTask { missing } => vec![
                format!("Provide: {}", missing.join(", ")),
                "A reminder needs a window (--window) and at least one schedule (--at)".into(),
            ],
            Self::BuilderUnbound => vec![
                "This is a bug: attach a record before updating it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidMeasurement(_)
            | Self::InvalidRecordId(_)
            | Self::InvalidChoice { .. }
            | Self::FormRejected { .. }
            | Self::IncompleteActionPlanTask { .. } => ErrorCategory::Validation,
            Self::UnknownUnit { .. } | Self::UnknownVocabulary(_) => ErrorCategory::NotFound,
            Self::BuilderUnbound => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
