// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for dtogen.
//!
//! Pure type-graph analysis and conversion synthesis. Nothing here touches the
//! filesystem or knows about a target language's syntax; schemas come in
//! through ports and abstract documents go out through them.
//!
//! ## Pipeline (per entity)
//!
//! ```text
//! EntitySchema
//!   └─ TypeClassifier  (registry decides customness)
//!        ├─ ShapeBuilder       -> DtoTypeDecl
//!        └─ ConversionPlanner  -> ConversionPlan (+ auxiliaries)
//!             └─ CodeDocument::assemble
//! ```
//!
// Public API - what the world sees
pub mod classifier;
pub mod conversion;
pub mod entities;
pub mod error;
pub mod mapping;
pub mod registry;
pub mod shape_builder;

mod validation;

// Re-exports for convenience
pub use classifier::{Classification, TypeClassifier};
pub use conversion::{
    AuxiliaryConversion, ContainerForm, ConversionPlan, ConversionPlanner, FieldAssignment,
    FieldConversion, HelperNames, HelperStrategy,
};
pub use entities::{
    AggregateKind, CodeDocument, Diagnostic, DiagnosticCode, EntitySchema, FieldSchema, Fragment,
    RunSummary, Severity, ShapeKind, TypeDescriptor, TypeHandle,
};
pub use error::{DomainError, ErrorCategory};
pub use mapping::DtoMapper;
pub use registry::{CustomTypeRule, DomainRegistry};
pub use shape_builder::{DEFAULT_DTO_NAMESPACE_SUFFIX, DtoFieldDecl, DtoTypeDecl, ShapeBuilder};
pub use validation::DomainValidator;
