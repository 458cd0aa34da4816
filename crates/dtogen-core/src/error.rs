//! Unified error handling for dtogen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for dtogen core operations.
#[derive(Debug, Error, Clone)]
pub enum DtogenError {
    /// Errors from the domain layer (schema contract violations, mapping).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl DtogenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in dtogen".into(),
                "Please report this issue at: https://github.com/cosecruz/dtogen/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type DtogenResult<T> = Result<T, DtogenError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> DtogenResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> DtogenResult<T> {
        self.map_err(|e| DtogenError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_keep_their_category() {
        let err: DtogenError = DomainError::UnknownEntity("X".into()).into();
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let err: DtogenError = DomainError::MalformedDescriptor {
            type_name: "List<>".into(),
            reason: "no arguments".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn missing_adapter_is_a_configuration_problem() {
        let err: DtogenError = ApplicationError::AdapterNotConfigured {
            name: "marker scanner",
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let io: Result<(), std::io::Error> = Err(std::io::Error::other("disk full"));
        let err = io.context("writing output").unwrap_err();
        assert!(err.to_string().contains("writing output: disk full"));
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
