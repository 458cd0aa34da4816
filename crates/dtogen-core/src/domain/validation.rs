use std::collections::HashSet;

use crate::domain::{
    entities::{EntitySchema, ShapeKind, TypeDescriptor},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Checks the schema provider's contract. Any violation is fatal for the run.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_entity(entity: &EntitySchema) -> Result<(), DomainError> {
        if entity.simple_name().trim().is_empty() {
            return Err(DomainError::InvalidEntity {
                entity: entity.qualified_name(),
                reason: "entity name is empty".into(),
            });
        }

        let mut seen = HashSet::new();
        for field in entity.fields() {
            if field.name.trim().is_empty() {
                return Err(DomainError::InvalidEntity {
                    entity: entity.qualified_name(),
                    reason: "field name is empty".into(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(DomainError::DuplicateField {
                    entity: entity.qualified_name(),
                    field: field.name.clone(),
                });
            }
            Self::validate_descriptor(&field.declared_type)?;
        }

        Ok(())
    }

    /// Structural checks, applied recursively.
    pub fn validate_descriptor(ty: &TypeDescriptor) -> Result<(), DomainError> {
        let malformed = |reason: &str| DomainError::MalformedDescriptor {
            type_name: ty.to_string(),
            reason: reason.to_string(),
        };

        match ty.shape() {
            ShapeKind::Array => {
                let element = ty
                    .element_type()
                    .ok_or_else(|| malformed("array without element type"))?;
                Self::validate_descriptor(element)?;
            }
            ShapeKind::GenericContainer if ty.type_arguments().is_empty() => {
                return Err(malformed("generic container without type arguments"));
            }
            ShapeKind::Dictionary if ty.type_arguments().len() != 2 => {
                return Err(malformed("dictionary needs exactly two type arguments"));
            }
            ShapeKind::Primitive | ShapeKind::CustomEntity(_) if ty.name().trim().is_empty() => {
                return Err(malformed("type name is empty"));
            }
            _ => {}
        }

        for arg in ty.type_arguments() {
            Self::validate_descriptor(arg)?;
        }
        Ok(())
    }
}
