//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the generation driver needs from the host:
//! candidate discovery, type schemas, text rendering, and somewhere to put
//! the results. The `dtogen-adapters` crate provides implementations.

use crate::domain::{
    AuxiliaryConversion, CodeDocument, ConversionPlan, Diagnostic, DtoTypeDecl, EntitySchema,
    RunSummary, TypeHandle,
};
use crate::error::DtogenResult;

/// Port for discovering the types marked for generation.
///
/// Implemented by:
/// - `dtogen_adapters::domain_store::InMemoryDomain` (manifest-backed)
pub trait MarkerScanner: Send + Sync {
    /// Candidate handles, in a stable order.
    fn scan(&self) -> DtogenResult<Vec<TypeHandle>>;
}

/// Port for resolving a type into its schema.
///
/// Implemented by:
/// - `dtogen_adapters::domain_store::InMemoryDomain`
///
/// ## Design Notes
///
/// - Returning `None` means "not an aggregate this provider knows"; the driver
///   reports it and moves on.
/// - Descriptors must satisfy the structural contract checked by
///   `DomainValidator`.
pub trait SchemaProvider: Send + Sync {
    fn resolve(&self, handle: &TypeHandle) -> Option<EntitySchema>;
}

/// Port for turning abstract documents into target-language text.
///
/// Implemented by:
/// - `dtogen_adapters::renderer::CSharpRenderer`
/// - `dtogen_adapters::renderer::JsonRenderer`
pub trait CodeRenderer: Send + Sync {
    /// Extension of emitted files, without the leading dot (`cs`, `json`).
    fn file_extension(&self) -> &'static str;

    /// The DTO declaration.
    fn render_dto_type(&self, dto: &DtoTypeDecl) -> String;

    /// The primary entity-to-DTO conversion.
    fn render_primary(&self, plan: &ConversionPlan) -> String;

    /// One auxiliary (container) conversion.
    fn render_auxiliary(&self, helper: &AuxiliaryConversion) -> String;

    /// A complete document.
    fn render_document(&self, document: &CodeDocument) -> DtogenResult<String>;

    /// The end-of-run summary document.
    fn render_summary(&self, summary: &RunSummary) -> String;
}

/// Port for registering generated text.
///
/// Implemented by:
/// - `dtogen_adapters::sink::MemorySink` (tests, `--stdout`)
/// - `dtogen_adapters::sink::DirectorySink` (files on disk)
pub trait EmissionSink: Send + Sync {
    fn add_document(&self, name: &str, text: &str) -> DtogenResult<()>;
}

/// Port for reporting non-fatal findings.
///
/// Implemented by:
/// - `dtogen_adapters::sink::TracingDiagnostics`
/// - `dtogen_adapters::sink::CollectingDiagnostics`
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}
