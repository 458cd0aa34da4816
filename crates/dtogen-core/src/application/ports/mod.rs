//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `dtogen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `MarkerScanner`: Which types are marked for generation
//!   - `SchemaProvider`: What a type looks like
//!   - `CodeRenderer`: Target-language text
//!   - `EmissionSink`: Where generated documents go
//!   - `DiagnosticSink`: Where findings go
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CodeRenderer, DiagnosticSink, EmissionSink, MarkerScanner, SchemaProvider};
