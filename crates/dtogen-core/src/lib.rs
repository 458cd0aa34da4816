//! dtogen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the dtogen
//! entity-to-DTO generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            dtogen-cli (CLI)             │
//! │       (Implements Driving Ports)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │ (GenerationService, InspectionService)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │  (Scanner, Provider, Renderer, Sinks)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     dtogen-adapters (Infrastructure)    │
//! │ (Manifests, InMemoryDomain, CSharp...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Classifier, ShapeBuilder, Planner...)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dtogen_core::prelude::*;
//!
//! let service = GenerationService::new(provider, renderer, sink, diagnostics)
//!     .with_scanner(scanner)
//!     .with_options(GenerationOptions::default());
//!
//! let report = service.run()?;
//! for doc in &report.documents {
//!     println!("{}", doc.name);
//! }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationOptions, GenerationReport, GenerationService, InspectionService,
        ports::{CodeRenderer, DiagnosticSink, EmissionSink, MarkerScanner, SchemaProvider},
    };
    pub use crate::domain::{
        AggregateKind, CodeDocument, CustomTypeRule, Diagnostic, DiagnosticCode, DtoMapper,
        EntitySchema, Severity, TypeDescriptor, TypeHandle,
    };
    pub use crate::error::{DtogenError, DtogenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
