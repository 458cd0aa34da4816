//! Infrastructure adapters for dtogen.
//!
//! This crate implements the ports defined in `dtogen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_domain;
pub mod domain_store;
pub mod manifest;
pub mod renderer;
pub mod sink;

// Re-export commonly used adapters
pub use domain_store::InMemoryDomain;
pub use manifest::{DomainManifest, ManifestError, ResolvedDomain};
pub use renderer::{CSharpRenderer, JsonRenderer, RendererKind};
pub use sink::{CollectingDiagnostics, DirectorySink, MemorySink, TracingDiagnostics};
