//! Conversion planning.
//!
//! For every entity the planner decides, field by field, how the entity value
//! becomes the DTO value, and which auxiliary helpers are needed for container
//! fields. The plan is language-neutral; renderers turn it into code and the
//! [`DtoMapper`](super::mapping::DtoMapper) executes it directly.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::classifier::Classification;
use super::entities::{EntitySchema, FieldSchema, ShapeKind, TypeDescriptor, dto_name_for};
use super::shape_builder::ShapeBuilder;

/// How a single DTO field obtains its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldConversion {
    /// Copied unchanged.
    Copy,
    /// Converted through the nested entity's own conversion.
    Convert { entity: String, dto_type: String },
    /// As `Convert`, but an absent value stays absent.
    ConvertIfPresent { entity: String, dto_type: String },
    /// Delegated to the named auxiliary conversion.
    Helper { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAssignment {
    pub field: String,
    pub conversion: FieldConversion,
}

/// Runtime shape of a container field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerForm {
    Array,
    Collection,
    Dictionary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum HelperStrategy {
    /// Convert every element, preserving order and count. Absent input
    /// yields an empty container.
    MapElements {
        element_entity: String,
        element_dto_type: String,
        element_nullable: bool,
    },
    /// Absent or empty input yields an empty container; anything else yields
    /// the null placeholder.
    Unsupported,
}

/// Helper converting one container-typed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryConversion {
    pub name: String,
    pub field: String,
    /// Container name without arguments (`List`, `Dictionary`); empty for arrays.
    pub container: String,
    /// Entity-side type, without the top-level `?`.
    pub source_type_text: String,
    /// DTO-side type, without the top-level `?`.
    pub result_type_text: String,
    pub form: ContainerForm,
    pub strategy: HelperStrategy,
}

impl AuxiliaryConversion {
    pub fn is_supported(&self) -> bool {
        !matches!(self.strategy, HelperStrategy::Unsupported)
    }
}

/// Everything needed to convert one entity into its DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionPlan {
    /// Qualified entity name.
    pub entity: String,
    pub entity_name: String,
    pub entity_namespace: String,
    pub dto_name: String,
    pub dto_namespace: String,
    pub direct_fields: Vec<String>,
    pub converted_fields: Vec<String>,
    pub container_fields: Vec<String>,
    /// One per field, in field order.
    pub assignments: Vec<FieldAssignment>,
    /// One per container field, in field order.
    pub auxiliaries: Vec<AuxiliaryConversion>,
    /// Namespaces of the types the fields mention, plus the DTO namespaces
    /// of the custom ones. Sorted; never contains `dto_namespace`.
    #[serde(default)]
    pub imports: Vec<String>,
}

impl ConversionPlan {
    pub fn auxiliary(&self, name: &str) -> Option<&AuxiliaryConversion> {
        self.auxiliaries.iter().find(|a| a.name == name)
    }

    pub fn assignment(&self, field: &str) -> Option<&FieldAssignment> {
        self.assignments.iter().find(|a| a.field == field)
    }

    pub fn unsupported_auxiliaries(&self) -> impl Iterator<Item = &AuxiliaryConversion> {
        self.auxiliaries.iter().filter(|a| !a.is_supported())
    }
}

/// Helper-name allocator, owned by one generation run.
///
/// Names are `<Entity><Field>ToDto<n>`, `n` counting from 1 across the run.
#[derive(Debug, Default)]
pub struct HelperNames {
    issued: usize,
}

impl HelperNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_name(&mut self, entity: &str, field: &str) -> String {
        self.issued += 1;
        format!("{entity}{field}ToDto{}", self.issued)
    }

    pub fn issued(&self) -> usize {
        self.issued
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConversionPlanner<'b, 'r, 's> {
    shapes: &'b ShapeBuilder<'r, 's>,
}

impl<'b, 'r, 's> ConversionPlanner<'b, 'r, 's> {
    pub fn new(shapes: &'b ShapeBuilder<'r, 's>) -> Self {
        Self { shapes }
    }

    pub fn plan(&self, entity: &EntitySchema, names: &mut HelperNames) -> ConversionPlan {
        let owner = entity.namespace();
        let classifier = self.shapes.classifier();

        let mut plan = ConversionPlan {
            entity: entity.qualified_name(),
            entity_name: entity.simple_name().to_string(),
            entity_namespace: owner.to_string(),
            dto_name: entity.dto_name(),
            dto_namespace: self.shapes.dto_namespace(owner),
            direct_fields: Vec::new(),
            converted_fields: Vec::new(),
            container_fields: Vec::new(),
            assignments: Vec::with_capacity(entity.fields().len()),
            auxiliaries: Vec::new(),
            imports: Vec::new(),
        };
        let mut imports = BTreeSet::new();
        if !owner.is_empty() {
            imports.insert(owner.to_string());
        }

        for field in entity.fields() {
            let ty = &field.declared_type;
            let conversion = match classifier.classify(field, owner) {
                Classification::Primitive
                | Classification::ArrayOfPrimitive
                | Classification::ContainerOfPrimitive => {
                    plan.direct_fields.push(field.name.clone());
                    FieldConversion::Copy
                }
                Classification::DictionaryContainer
                    if !classifier.has_custom_argument(ty, owner) =>
                {
                    plan.direct_fields.push(field.name.clone());
                    FieldConversion::Copy
                }
                Classification::CustomDirect => {
                    plan.converted_fields.push(field.name.clone());
                    FieldConversion::Convert {
                        entity: ty.qualified_name(),
                        dto_type: dto_name_for(ty.name()),
                    }
                }
                Classification::CustomNullable => {
                    plan.converted_fields.push(field.name.clone());
                    FieldConversion::ConvertIfPresent {
                        entity: ty.qualified_name(),
                        dto_type: dto_name_for(ty.name()),
                    }
                }
                Classification::ArrayOfCustom
                | Classification::ContainerOfCustom
                | Classification::DictionaryContainer => {
                    let name = names.next_name(entity.simple_name(), &field.name);
                    plan.container_fields.push(field.name.clone());
                    plan.auxiliaries
                        .push(self.auxiliary(name.clone(), field, owner));
                    FieldConversion::Helper { name }
                }
            };

            plan.assignments.push(FieldAssignment {
                field: field.name.clone(),
                conversion,
            });
            self.collect_imports(ty, owner, &mut imports);
        }

        imports.remove(&plan.dto_namespace);
        plan.imports = imports.into_iter().collect();
        plan
    }

    /// Walks every position of `ty`, arrays and nested arguments included.
    fn collect_imports(&self, ty: &TypeDescriptor, owner: &str, out: &mut BTreeSet<String>) {
        if ty.shape() == ShapeKind::Array {
            if let Some(element) = ty.element_type() {
                self.collect_imports(element, owner, out);
            }
            return;
        }
        if !ty.namespace().is_empty() {
            out.insert(ty.namespace().to_string());
            if self.shapes.classifier().is_custom(ty, owner) {
                out.insert(self.shapes.dto_namespace(ty.namespace()));
            }
        }
        for arg in ty.type_arguments() {
            self.collect_imports(arg, owner, out);
        }
    }

    fn auxiliary(&self, name: String, field: &FieldSchema, owner: &str) -> AuxiliaryConversion {
        let ty = &field.declared_type;
        let form = match ty.shape() {
            ShapeKind::Array => ContainerForm::Array,
            ShapeKind::Dictionary => ContainerForm::Dictionary,
            _ => ContainerForm::Collection,
        };

        let strategy = match (form, ty.element_type()) {
            (ContainerForm::Array | ContainerForm::Collection, Some(element)) => {
                map_elements(element)
            }
            _ => HelperStrategy::Unsupported,
        };

        AuxiliaryConversion {
            name,
            field: field.name.clone(),
            container: ty.name().to_string(),
            source_type_text: ty.display_without_nullability(),
            result_type_text: self.shapes.dto_type_text(ty, owner),
            form,
            strategy,
        }
    }
}

fn map_elements(element: &TypeDescriptor) -> HelperStrategy {
    HelperStrategy::MapElements {
        element_entity: element.qualified_name(),
        element_dto_type: dto_name_for(element.name()),
        element_nullable: element.is_nullable(),
    }
}
