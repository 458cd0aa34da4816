// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports carry them around)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Schema Contract Violations (the provider handed us something broken)
    // ========================================================================
    #[error("Malformed type descriptor for '{type_name}': {reason}")]
    MalformedDescriptor { type_name: String, reason: String },

    #[error("Invalid entity '{entity}': {reason}")]
    InvalidEntity { entity: String, reason: String },

    #[error("Duplicate field '{field}' in entity '{entity}'")]
    DuplicateField { entity: String, field: String },

    // ========================================================================
    // Mapping Errors (reference mapper)
    // ========================================================================
    #[error("No conversion plan for entity '{0}'")]
    UnknownEntity(String),

    #[error("Value for '{path}' has the wrong shape: {reason}")]
    ValueShape { path: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedDescriptor { type_name, reason } => vec![
                format!("The type '{}' could not be analysed: {}", type_name, reason),
                "Generic containers need at least one type argument".into(),
                "Dictionaries need exactly two type arguments (key, value)".into(),
            ],
            Self::InvalidEntity { entity, .. } => vec![
                format!("Check the declaration of '{}'", entity),
                "Every entity needs a name and named fields".into(),
            ],
            Self::DuplicateField { entity, field } => vec![
                format!("'{}' declares '{}' more than once", entity, field),
                "Field names must be unique within an entity".into(),
            ],
            Self::UnknownEntity(name) => vec![
                format!("'{}' was not part of the generation run", name),
                "Mark the type for generation and run again".into(),
            ],
            Self::ValueShape { path, .. } => vec![
                format!("Check the value at '{}'", path),
                "Non-nullable nested entities must be present".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedDescriptor { .. }
            | Self::InvalidEntity { .. }
            | Self::DuplicateField { .. }
            | Self::ValueShape { .. } => ErrorCategory::Validation,
            Self::UnknownEntity(_) => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
