//! DTO declarations.
//!
//! Mirrors an entity field-for-field, replacing every custom type (directly,
//! as an array element, or as a container argument) with `<Name>Dto`.

use serde::{Deserialize, Serialize};

use super::classifier::{Classification, TypeClassifier};
use super::entities::{AggregateKind, EntitySchema, FieldSchema, TypeDescriptor, dto_name_for};

/// Namespace suffix used when none is configured.
pub const DEFAULT_DTO_NAMESPACE_SUFFIX: &str = "Dtos";

/// One DTO property.
///
/// `type_text` never carries the top-level `?`; `nullable` does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtoFieldDecl {
    pub name: String,
    pub type_text: String,
    pub nullable: bool,
}

impl DtoFieldDecl {
    /// Type text including the nullability marker.
    pub fn full_type_text(&self) -> String {
        if self.nullable {
            format!("{}?", self.type_text)
        } else {
            self.type_text.clone()
        }
    }
}

/// The generated DTO type for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtoTypeDecl {
    pub name: String,
    pub namespace: String,
    pub kind: AggregateKind,
    /// Qualified name of the entity this DTO mirrors.
    pub source_entity: String,
    pub fields: Vec<DtoFieldDecl>,
}

impl DtoTypeDecl {
    pub fn field(&self, name: &str) -> Option<&DtoFieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ShapeBuilder<'r, 's> {
    classifier: TypeClassifier<'r>,
    namespace_suffix: &'s str,
}

impl<'r, 's> ShapeBuilder<'r, 's> {
    pub fn new(classifier: TypeClassifier<'r>, namespace_suffix: &'s str) -> Self {
        Self {
            classifier,
            namespace_suffix,
        }
    }

    pub fn classifier(&self) -> &TypeClassifier<'r> {
        &self.classifier
    }

    /// Namespace the DTOs of entities in `entity_namespace` live in.
    pub fn dto_namespace(&self, entity_namespace: &str) -> String {
        match (entity_namespace.is_empty(), self.namespace_suffix.is_empty()) {
            (true, _) => self.namespace_suffix.to_string(),
            (false, true) => entity_namespace.to_string(),
            (false, false) => format!("{}.{}", entity_namespace, self.namespace_suffix),
        }
    }

    pub fn build_dto_type(&self, entity: &EntitySchema) -> DtoTypeDecl {
        let fields = entity
            .fields()
            .iter()
            .map(|field| {
                let classification = self.classifier.classify(field, entity.namespace());
                self.build_dto_field(classification, field, entity.namespace())
            })
            .collect();

        DtoTypeDecl {
            name: entity.dto_name(),
            namespace: self.dto_namespace(entity.namespace()),
            kind: entity.kind(),
            source_entity: entity.qualified_name(),
            fields,
        }
    }

    pub fn build_dto_field(
        &self,
        classification: Classification,
        field: &FieldSchema,
        owner_namespace: &str,
    ) -> DtoFieldDecl {
        let ty = &field.declared_type;
        let (type_text, nullable) = match classification {
            Classification::Primitive
            | Classification::ArrayOfPrimitive
            | Classification::ContainerOfPrimitive => {
                (ty.display_without_nullability(), ty.is_nullable())
            }
            Classification::CustomDirect => (dto_name_for(ty.name()), false),
            Classification::CustomNullable => (dto_name_for(ty.name()), true),
            Classification::ArrayOfCustom => (self.dto_type_text(ty, owner_namespace), false),
            Classification::ContainerOfCustom => (self.dto_type_text(ty, owner_namespace), false),
            Classification::DictionaryContainer => {
                if self.classifier.has_custom_argument(ty, owner_namespace) {
                    (self.dto_type_text(ty, owner_namespace), false)
                } else {
                    (ty.display_without_nullability(), ty.is_nullable())
                }
            }
        };

        DtoFieldDecl {
            name: field.name.clone(),
            type_text,
            nullable,
        }
    }

    /// Type text with custom positions replaced by their DTO names, without
    /// the top-level `?`.
    ///
    /// Replacement happens for the type itself, an array's element, or a
    /// container's direct arguments. Each replaced position keeps its own `?`.
    pub fn dto_type_text(&self, ty: &TypeDescriptor, owner_namespace: &str) -> String {
        let position = |arg: &TypeDescriptor| -> String {
            if self.classifier.is_custom(arg, owner_namespace) {
                with_marker(dto_name_for(arg.name()), arg.is_nullable())
            } else {
                arg.to_string()
            }
        };

        if ty.is_generic() {
            let args: Vec<String> = ty.type_arguments().iter().map(position).collect();
            format!("{}<{}>", ty.name(), args.join(", "))
        } else if let Some(element) = ty.element_type() {
            format!("{}[]", position(element))
        } else if self.classifier.is_custom(ty, owner_namespace) {
            dto_name_for(ty.name())
        } else {
            ty.display_without_nullability()
        }
    }
}

fn with_marker(text: String, nullable: bool) -> String {
    if nullable { format!("{text}?") } else { text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registry::{CustomTypeRule, DomainRegistry};

    const NS: &str = "Acme.Domain";

    fn registry() -> DomainRegistry {
        let asset = EntitySchema::new(NS, "CompanyAsset", AggregateKind::Class);
        let code = EntitySchema::new(NS, "AssetCode", AggregateKind::Struct);
        DomainRegistry::build(CustomTypeRule::Registry, &[asset, code], |_| None)
    }

    fn asset() -> TypeDescriptor {
        TypeDescriptor::aggregate(NS, "CompanyAsset", AggregateKind::Class)
    }

    fn code() -> TypeDescriptor {
        TypeDescriptor::aggregate(NS, "AssetCode", AggregateKind::Struct)
    }

    fn prim(name: &str) -> TypeDescriptor {
        TypeDescriptor::primitive("", name)
    }

    fn dto_for(entity: &EntitySchema) -> DtoTypeDecl {
        let registry = registry();
        let builder = ShapeBuilder::new(TypeClassifier::new(&registry), DEFAULT_DTO_NAMESPACE_SUFFIX);
        builder.build_dto_type(entity)
    }

    fn field(dto: &DtoTypeDecl, name: &str) -> (String, bool) {
        let f = dto.field(name).expect("field present");
        (f.type_text.clone(), f.nullable)
    }

    #[test]
    fn primitive_entity_is_mirrored_exactly() {
        let address = EntitySchema::new(NS, "Address", AggregateKind::Class)
            .with_field("StreetName", prim("string"))
            .with_field("HouseNumber", prim("int"))
            .with_field("PostCode", prim("string").nullable());

        let dto = dto_for(&address);

        assert_eq!(dto.name, "AddressDto");
        assert_eq!(dto.namespace, "Acme.Domain.Dtos");
        assert_eq!(dto.kind, AggregateKind::Class);
        assert_eq!(dto.source_entity, "Acme.Domain.Address");
        let names: Vec<_> = dto.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["StreetName", "HouseNumber", "PostCode"]);
        assert_eq!(field(&dto, "HouseNumber"), ("int".into(), false));
        assert_eq!(field(&dto, "PostCode"), ("string".into(), true));
    }

    #[test]
    fn custom_fields_become_dtos() {
        let entity = EntitySchema::new(NS, "CompanyAsset", AggregateKind::Class)
            .with_field("AssetCode", code())
            .with_field("Backup", code().nullable());

        let dto = dto_for(&entity);

        assert_eq!(field(&dto, "AssetCode"), ("AssetCodeDto".into(), false));
        assert_eq!(field(&dto, "Backup"), ("AssetCodeDto".into(), true));
    }

    #[test]
    fn arrays_of_custom_keep_element_nullability() {
        let entity = EntitySchema::new(NS, "Owner", AggregateKind::Class)
            .with_field("Assets", TypeDescriptor::array(asset()).nullable())
            .with_field("Maybe", TypeDescriptor::array(asset().nullable()))
            .with_field("Scores", TypeDescriptor::array(prim("int")).nullable());

        let dto = dto_for(&entity);

        assert_eq!(field(&dto, "Assets"), ("CompanyAssetDto[]".into(), false));
        assert_eq!(field(&dto, "Maybe"), ("CompanyAssetDto?[]".into(), false));
        assert_eq!(field(&dto, "Scores"), ("int[]".into(), true));
    }

    #[test]
    fn containers_replace_custom_arguments_per_position() {
        let entity = EntitySchema::new(NS, "Employee", AggregateKind::Class)
            .with_field(
                "AssetsAllocated",
                TypeDescriptor::generic("", "IReadOnlyCollection", vec![asset()]),
            )
            .with_field(
                "PromotionCodes",
                TypeDescriptor::generic("", "Dictionary", vec![prim("int"), prim("string")])
                    .nullable(),
            )
            .with_field(
                "Codes",
                TypeDescriptor::generic("", "Dictionary", vec![prim("string"), code().nullable()])
                    .nullable(),
            );

        let dto = dto_for(&entity);

        assert_eq!(
            field(&dto, "AssetsAllocated"),
            ("IReadOnlyCollection<CompanyAssetDto>".into(), false)
        );
        assert_eq!(
            field(&dto, "PromotionCodes"),
            ("Dictionary<int, string>".into(), true)
        );
        assert_eq!(
            field(&dto, "Codes"),
            ("Dictionary<string, AssetCodeDto?>".into(), false)
        );
    }

    #[test]
    fn struct_entities_produce_struct_dtos() {
        let balance = EntitySchema::new(NS, "HolidayBalance", AggregateKind::Struct)
            .with_field("Balance", prim("decimal"));
        assert_eq!(dto_for(&balance).kind, AggregateKind::Struct);
    }

    #[test]
    fn dto_namespace_handles_empty_parts() {
        let registry = registry();
        let classifier = TypeClassifier::new(&registry);

        assert_eq!(ShapeBuilder::new(classifier, "Dtos").dto_namespace(""), "Dtos");
        assert_eq!(ShapeBuilder::new(classifier, "").dto_namespace("Acme"), "Acme");
        assert_eq!(
            ShapeBuilder::new(classifier, "Contracts").dto_namespace("Acme"),
            "Acme.Contracts"
        );
    }
}
