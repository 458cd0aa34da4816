//! Non-fatal findings reported during a generation run.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Stable diagnostic identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// No marker scanner was configured; nothing can be generated.
    MissingReceiver,
    /// A candidate could not be resolved to a schema.
    UnresolvableSchema,
    /// A dictionary (or multi-argument container) with a custom argument is
    /// converted to a null placeholder when non-empty.
    UnsupportedDictionaryConversion,
    /// A field references a domain type that is not itself marked.
    UnmarkedReference,
    /// Two candidates derive the same document name; the later one is skipped.
    DuplicateDocumentName,
    /// A copied field holds a domain type below the first container level,
    /// so the entity type appears unconverted in the DTO.
    NestedDomainType,
}

impl DiagnosticCode {
    pub const fn id(&self) -> &'static str {
        match self {
            Self::MissingReceiver => "DTOGEN001",
            Self::UnresolvableSchema => "DTOGEN002",
            Self::UnsupportedDictionaryConversion => "DTOGEN003",
            Self::UnmarkedReference => "DTOGEN004",
            Self::DuplicateDocumentName => "DTOGEN005",
            Self::NestedDomainType => "DTOGEN006",
        }
    }

    pub const fn default_severity(&self) -> Severity {
        match self {
            Self::MissingReceiver | Self::DuplicateDocumentName => Severity::Error,
            Self::UnresolvableSchema | Self::UnmarkedReference => Severity::Warning,
            Self::UnsupportedDictionaryConversion | Self::NestedDomainType => Severity::Info,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
}

impl Diagnostic {
    /// Diagnostic with the code's default severity.
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.default_severity(),
            code,
            message: message.into(),
        }
    }

    pub fn missing_receiver() -> Self {
        Self::new(
            DiagnosticCode::MissingReceiver,
            "no marker scanner is configured; no DTOs were generated",
        )
    }

    pub fn unresolvable(handle: &str) -> Self {
        Self::new(
            DiagnosticCode::UnresolvableSchema,
            format!("could not resolve a schema for '{handle}'; skipped"),
        )
    }

    pub fn unsupported_conversion(entity: &str, field: &str, type_text: &str) -> Self {
        Self::new(
            DiagnosticCode::UnsupportedDictionaryConversion,
            format!(
                "{entity}.{field}: '{type_text}' has a domain type argument; \
                 non-empty values convert to null"
            ),
        )
    }

    pub fn unmarked_reference(entity: &str, field: &str, referenced: &str) -> Self {
        Self::new(
            DiagnosticCode::UnmarkedReference,
            format!(
                "{entity}.{field} references '{referenced}', which is not marked for generation; \
                 its DTO will not be emitted by this run"
            ),
        )
    }

    pub fn duplicate_document(document: &str, kept: &str, skipped: &str) -> Self {
        Self::new(
            DiagnosticCode::DuplicateDocumentName,
            format!("'{skipped}' and '{kept}' both produce document '{document}'; '{skipped}' skipped"),
        )
    }

    pub fn nested_domain_type(entity: &str, field: &str, referenced: &str) -> Self {
        Self::new(
            DiagnosticCode::NestedDomainType,
            format!(
                "{entity}.{field} nests '{referenced}' inside another container; \
                 the value is copied without conversion"
            ),
        )
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.code, self.message)
    }
}
