//! Application layer errors.
//!
//! These errors represent failures in orchestration, not type analysis.
//! Analysis errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Port/Adapter not configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },

    /// The marker scanner could not produce candidates.
    #[error("Marker scan failed: {reason}")]
    ScanFailed { reason: String },

    /// A renderer could not produce text for a document.
    #[error("Rendering '{name}' failed: {reason}")]
    RenderingFailed { name: String, reason: String },

    /// The emission sink rejected a document.
    #[error("Emitting '{name}' failed: {reason}")]
    EmissionFailed { name: String, reason: String },

    /// Shared adapter state is unusable (poisoned lock).
    #[error("Adapter state is unavailable: {name}")]
    StateLockError { name: &'static str },

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {}", name),
                "This is likely a configuration error".into(),
            ],
            Self::ScanFailed { .. } => vec![
                "Check that the domain manifests are readable".into(),
                "Run with -v for more detail".into(),
            ],
            Self::EmissionFailed { name, .. } => vec![
                format!("Could not write '{}'", name),
                "Check that the output directory is writable".into(),
                "Use --stdout to print documents instead".into(),
            ],
            Self::StateLockError { .. } => vec![
                "An earlier operation panicked while holding shared state".into(),
                "Try again".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::ScanFailed { .. }
            | Self::RenderingFailed { .. }
            | Self::EmissionFailed { .. }
            | Self::StateLockError { .. } => ErrorCategory::Internal,
        }
    }
}
