//! Field classification.
//!
//! Every field of every entity falls into exactly one [`Classification`].
//! The rules are checked in order:
//!
//! 1. dictionary-family container  -> `DictionaryContainer`
//! 2. other generic container      -> `ContainerOfCustom` if any argument is custom
//! 3. array                        -> `ArrayOfCustom` if the element is custom
//! 4. aggregate                    -> `CustomNullable` / `CustomDirect`
//! 5. anything else                -> `Primitive`

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entities::{FieldSchema, ShapeKind, TypeDescriptor};
use super::registry::DomainRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Primitive,
    CustomDirect,
    CustomNullable,
    ArrayOfPrimitive,
    ArrayOfCustom,
    ContainerOfPrimitive,
    ContainerOfCustom,
    DictionaryContainer,
}

impl Classification {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primitive => "primitive",
            Self::CustomDirect => "custom",
            Self::CustomNullable => "custom-nullable",
            Self::ArrayOfPrimitive => "array-of-primitive",
            Self::ArrayOfCustom => "array-of-custom",
            Self::ContainerOfPrimitive => "container-of-primitive",
            Self::ContainerOfCustom => "container-of-custom",
            Self::DictionaryContainer => "dictionary",
        }
    }

    /// Whether the field is converted through its own DTO (not copied).
    pub const fn is_custom(&self) -> bool {
        matches!(
            self,
            Self::CustomDirect | Self::CustomNullable | Self::ArrayOfCustom | Self::ContainerOfCustom
        )
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies fields against a run's registry.
#[derive(Debug, Clone, Copy)]
pub struct TypeClassifier<'r> {
    registry: &'r DomainRegistry,
}

impl<'r> TypeClassifier<'r> {
    pub fn new(registry: &'r DomainRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r DomainRegistry {
        self.registry
    }

    pub fn classify(&self, field: &FieldSchema, owner_namespace: &str) -> Classification {
        self.classify_type(&field.declared_type, owner_namespace)
    }

    pub fn classify_type(&self, ty: &TypeDescriptor, owner_namespace: &str) -> Classification {
        match ty.shape() {
            ShapeKind::Dictionary => Classification::DictionaryContainer,
            ShapeKind::GenericContainer => {
                if self.has_custom_argument(ty, owner_namespace) {
                    Classification::ContainerOfCustom
                } else {
                    Classification::ContainerOfPrimitive
                }
            }
            ShapeKind::Array => match ty.element_type() {
                Some(element) if self.is_custom(element, owner_namespace) => {
                    Classification::ArrayOfCustom
                }
                _ => Classification::ArrayOfPrimitive,
            },
            ShapeKind::CustomEntity(_) if self.is_custom(ty, owner_namespace) => {
                if ty.is_nullable() {
                    Classification::CustomNullable
                } else {
                    Classification::CustomDirect
                }
            }
            _ => Classification::Primitive,
        }
    }

    /// The single customness predicate, used at every position.
    pub fn is_custom(&self, ty: &TypeDescriptor, owner_namespace: &str) -> bool {
        self.registry.is_custom(ty, owner_namespace)
    }

    /// Whether any type argument of a container is custom.
    ///
    /// Arguments are checked one level deep; a container nested inside a
    /// container is never custom.
    pub fn has_custom_argument(&self, ty: &TypeDescriptor, owner_namespace: &str) -> bool {
        ty.type_arguments()
            .iter()
            .any(|arg| self.is_custom(arg, owner_namespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AggregateKind, EntitySchema};
    use crate::domain::registry::CustomTypeRule;

    const NS: &str = "Acme.Domain";

    fn registry() -> DomainRegistry {
        let asset = EntitySchema::new(NS, "CompanyAsset", AggregateKind::Class);
        let code = EntitySchema::new(NS, "AssetCode", AggregateKind::Struct);
        DomainRegistry::build(CustomTypeRule::Registry, &[asset, code], |_| None)
    }

    fn asset() -> TypeDescriptor {
        TypeDescriptor::aggregate(NS, "CompanyAsset", AggregateKind::Class)
    }

    fn int() -> TypeDescriptor {
        TypeDescriptor::primitive("", "int")
    }

    fn classify(ty: TypeDescriptor) -> Classification {
        let registry = registry();
        TypeClassifier::new(&registry).classify(&FieldSchema::new("F", ty), NS)
    }

    #[test]
    fn scalars_are_primitive() {
        assert_eq!(classify(int()), Classification::Primitive);
        assert_eq!(classify(int().nullable()), Classification::Primitive);
        assert_eq!(
            classify(TypeDescriptor::primitive("System", "Guid")),
            Classification::Primitive
        );
    }

    #[test]
    fn aggregates_split_on_nullability() {
        let code = TypeDescriptor::aggregate(NS, "AssetCode", AggregateKind::Struct);
        assert_eq!(classify(code.clone()), Classification::CustomDirect);
        assert_eq!(classify(code.nullable()), Classification::CustomNullable);
    }

    #[test]
    fn unknown_aggregate_is_primitive() {
        let uri = TypeDescriptor::aggregate("System", "Uri", AggregateKind::Class);
        assert_eq!(classify(uri), Classification::Primitive);
    }

    #[test]
    fn arrays_follow_element_customness() {
        assert_eq!(
            classify(TypeDescriptor::array(asset())),
            Classification::ArrayOfCustom
        );
        assert_eq!(
            classify(TypeDescriptor::array(asset().nullable())),
            Classification::ArrayOfCustom
        );
        assert_eq!(
            classify(TypeDescriptor::array(int())),
            Classification::ArrayOfPrimitive
        );
    }

    #[test]
    fn containers_follow_argument_customness() {
        assert_eq!(
            classify(TypeDescriptor::generic("", "IReadOnlyCollection", vec![asset()])),
            Classification::ContainerOfCustom
        );
        assert_eq!(
            classify(TypeDescriptor::generic("", "List", vec![int()])),
            Classification::ContainerOfPrimitive
        );
        assert_eq!(
            classify(TypeDescriptor::generic("", "Pair", vec![int(), asset()])),
            Classification::ContainerOfCustom
        );
    }

    #[test]
    fn nested_containers_are_not_custom() {
        let inner = TypeDescriptor::generic("", "List", vec![asset()]);
        assert_eq!(
            classify(TypeDescriptor::generic("", "List", vec![inner])),
            Classification::ContainerOfPrimitive
        );
    }

    #[test]
    fn dictionaries_regardless_of_arguments() {
        assert_eq!(
            classify(TypeDescriptor::generic("", "Dictionary", vec![int(), int()])),
            Classification::DictionaryContainer
        );
        assert_eq!(
            classify(TypeDescriptor::generic("", "Dictionary", vec![int(), asset()])),
            Classification::DictionaryContainer
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let ty = TypeDescriptor::generic("", "List", vec![asset()]);
        assert_eq!(classify(ty.clone()), classify(ty));
    }
}
