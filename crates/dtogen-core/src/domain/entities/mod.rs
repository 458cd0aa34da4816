pub mod code_document;
pub mod diagnostic;
pub mod entity_schema;
pub mod type_descriptor;

pub use code_document::{CodeDocument, Fragment, RunSummary};
pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use entity_schema::{EntitySchema, FieldSchema, dto_name_for};
pub use type_descriptor::{
    AggregateKind, ShapeKind, TypeDescriptor, TypeHandle, is_dictionary_family,
};
