//! Domain stores: adapters implementing both `MarkerScanner` and
//! `SchemaProvider`.

pub mod memory;

pub use memory::InMemoryDomain;
