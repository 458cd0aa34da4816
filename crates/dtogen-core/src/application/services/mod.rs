//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate DTOs" or "explain a domain".

pub mod generation_service;
pub mod inspection_service;

pub use generation_service::{
    EmittedDocument, GenerationOptions, GenerationReport, GenerationService,
};
pub use inspection_service::{
    EntityInspection, FieldInspection, InspectionReport, InspectionService,
};
