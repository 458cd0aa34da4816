//! Application layer for dtogen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, InspectionService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! analysis logic itself. All classification and planning lives in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    EmittedDocument, EntityInspection, FieldInspection, GenerationOptions, GenerationReport,
    GenerationService, InspectionReport, InspectionService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CodeRenderer, DiagnosticSink, EmissionSink, MarkerScanner, SchemaProvider};

pub use error::ApplicationError;
