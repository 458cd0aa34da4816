use std::fmt;

use serde::{Deserialize, Serialize};

use super::type_descriptor::{AggregateKind, TypeDescriptor};

/// One field of an entity, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub declared_type: TypeDescriptor,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, declared_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            declared_type,
        }
    }
}

/// A marked (or referenced) aggregate as described by the schema provider.
///
/// Field order is significant: DTO declarations and conversion assignments
/// follow it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    simple_name: String,
    namespace: String,
    kind: AggregateKind,
    fields: Vec<FieldSchema>,
}

impl EntitySchema {
    pub fn new(
        namespace: impl Into<String>,
        simple_name: impl Into<String>,
        kind: AggregateKind,
    ) -> Self {
        Self {
            simple_name: simple_name.into(),
            namespace: namespace.into(),
            kind,
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn with_field(mut self, name: impl Into<String>, declared_type: TypeDescriptor) -> Self {
        self.fields.push(FieldSchema::new(name, declared_type));
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldSchema>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub const fn kind(&self) -> AggregateKind {
        self.kind
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.namespace, self.simple_name)
        }
    }

    /// Name of the generated DTO: `<Name>Dto`.
    pub fn dto_name(&self) -> String {
        dto_name_for(&self.simple_name)
    }

    /// Descriptor referring to this entity, as a field type would.
    pub fn as_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::aggregate(&self.namespace, &self.simple_name, self.kind)
    }
}

impl fmt::Display for EntitySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.qualified_name())
    }
}

/// `<Name>Dto`
pub fn dto_name_for(simple_name: &str) -> String {
    format!("{simple_name}Dto")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_derived_from_namespace_and_simple_name() {
        let address = EntitySchema::new("Acme.Domain", "Address", AggregateKind::Class);
        assert_eq!(address.qualified_name(), "Acme.Domain.Address");
        assert_eq!(address.dto_name(), "AddressDto");
        assert_eq!(address.to_string(), "class Acme.Domain.Address");

        let global = EntitySchema::new("", "Money", AggregateKind::Struct);
        assert_eq!(global.qualified_name(), "Money");
    }

    #[test]
    fn fields_keep_declaration_order() {
        let entity = EntitySchema::new("Acme", "Address", AggregateKind::Class)
            .with_field("StreetName", TypeDescriptor::primitive("", "string"))
            .with_field("HouseNumber", TypeDescriptor::primitive("", "int"))
            .with_field("PostCode", TypeDescriptor::primitive("", "string"));

        let names: Vec<_> = entity.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["StreetName", "HouseNumber", "PostCode"]);
        assert!(entity.field("HouseNumber").is_some());
        assert!(entity.field("Missing").is_none());
    }
}
