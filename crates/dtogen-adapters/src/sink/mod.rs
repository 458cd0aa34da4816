//! Emission and diagnostic sinks.

pub mod diagnostics;
pub mod directory;
pub mod memory;

pub use diagnostics::{CollectingDiagnostics, TracingDiagnostics};
pub use directory::DirectorySink;
pub use memory::MemorySink;
