//! Built-in sample domain.
//!
//! A small HR model (employees, their address, allocated company assets and
//! holiday balance) that exercises every classification: primitives, foreign
//! types, nested classes and structs, a collection of a custom type and a
//! primitive dictionary. `dtogen demo` runs against it.
//!
//! The domain is expressed as a regular manifest so it goes through the same
//! loader as user manifests.

use dtogen_core::domain::{EntitySchema, TypeHandle};

use crate::manifest::{self, ManifestError, ResolvedDomain};

/// Namespace of every sample type.
pub const NAMESPACE: &str = "SourceGenerators.TestApp.Domain";

/// Manifest text of the sample domain (also shipped as `demos/employee.toml`).
pub const MANIFEST: &str = r#"# Sample HR domain.

[domain]
namespace = "SourceGenerators.TestApp.Domain"

[[types]]
name = "Address"
fields = [
    { name = "StreetName",  type = "string" },
    { name = "HouseNumber", type = "int" },
    { name = "PostCode",    type = "string" },
]

[[types]]
name = "AssetCode"
kind = "struct"
fields = [
    { name = "Code", type = "string" },
]

[[types]]
name = "CompanyAsset"
fields = [
    { name = "Name",      type = "string" },
    { name = "Worth",     type = "decimal" },
    { name = "AssetCode", type = "AssetCode" },
]

[[types]]
name = "HolidayBalance"
kind = "struct"
fields = [
    { name = "Balance", type = "decimal" },
]

[[types]]
name = "Employee"
fields = [
    { name = "Id",              type = "System.Guid" },
    { name = "Name",            type = "string" },
    { name = "DateOfBirth",     type = "System.DateTime" },
    { name = "DateOfJoining",   type = "System.DateTime" },
    { name = "AssetsAllocated", type = "System.Collections.Generic.IReadOnlyCollection<CompanyAsset>" },
    { name = "Address",         type = "Address" },
    { name = "HolidayBalance",  type = "HolidayBalance" },
    { name = "PromotionCodes",  type = "System.Collections.Generic.Dictionary<int, string>" },
]
"#;

/// Resolve the sample domain.
pub fn resolve() -> Result<ResolvedDomain, ManifestError> {
    manifest::resolve(&[manifest::parse_str(MANIFEST)?])
}

/// Sample schemas, in declaration order.
pub fn entities() -> Result<Vec<EntitySchema>, ManifestError> {
    Ok(resolve()?.entities)
}

/// Handles of the marked sample types.
pub fn marked() -> Result<Vec<TypeHandle>, ManifestError> {
    Ok(resolve()?.marked)
}
