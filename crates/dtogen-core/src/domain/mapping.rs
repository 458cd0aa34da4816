//! Reference mapper: executes conversion plans over dynamic values.
//!
//! Entity values are JSON objects keyed by field name. Arrays and collections
//! are JSON arrays, dictionaries are JSON objects. Missing keys read as
//! `null`.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::conversion::{
    AuxiliaryConversion, ContainerForm, ConversionPlan, FieldConversion, HelperStrategy,
};
use super::error::DomainError;

static NULL: Value = Value::Null;

#[derive(Debug, Clone, Default)]
pub struct DtoMapper {
    plans: HashMap<String, ConversionPlan>,
}

impl DtoMapper {
    pub fn new(plans: impl IntoIterator<Item = ConversionPlan>) -> Self {
        Self {
            plans: plans
                .into_iter()
                .map(|plan| (plan.entity.clone(), plan))
                .collect(),
        }
    }

    pub fn knows(&self, entity: &str) -> bool {
        self.plans.contains_key(entity)
    }

    /// Convert an entity value into its DTO value.
    pub fn map(&self, entity: &str, value: &Value) -> Result<Value, DomainError> {
        self.map_entity(entity, value, entity)
    }

    fn map_entity(&self, entity: &str, value: &Value, path: &str) -> Result<Value, DomainError> {
        let plan = self
            .plans
            .get(entity)
            .ok_or_else(|| DomainError::UnknownEntity(entity.to_string()))?;

        let fields = value.as_object().ok_or_else(|| DomainError::ValueShape {
            path: path.to_string(),
            reason: format!("expected an object, found {}", kind_of(value)),
        })?;

        let mut dto = Map::new();
        for assignment in &plan.assignments {
            let field_path = format!("{path}.{}", assignment.field);
            let input = fields.get(&assignment.field).unwrap_or(&NULL);

            let output = match &assignment.conversion {
                FieldConversion::Copy => input.clone(),
                FieldConversion::Convert { entity, .. } => {
                    if input.is_null() {
                        return Err(DomainError::ValueShape {
                            path: field_path,
                            reason: "non-nullable nested entity is null".into(),
                        });
                    }
                    self.map_entity(entity, input, &field_path)?
                }
                FieldConversion::ConvertIfPresent { entity, .. } => {
                    if input.is_null() {
                        Value::Null
                    } else {
                        self.map_entity(entity, input, &field_path)?
                    }
                }
                FieldConversion::Helper { name } => {
                    let helper = plan.auxiliary(name).ok_or_else(|| DomainError::ValueShape {
                        path: field_path.clone(),
                        reason: format!("plan has no helper named '{name}'"),
                    })?;
                    self.run_helper(helper, input, &field_path)?
                }
            };

            dto.insert(assignment.field.clone(), output);
        }

        Ok(Value::Object(dto))
    }

    fn run_helper(
        &self,
        helper: &AuxiliaryConversion,
        input: &Value,
        path: &str,
    ) -> Result<Value, DomainError> {
        match &helper.strategy {
            HelperStrategy::MapElements {
                element_entity,
                element_nullable,
                ..
            } => {
                let items = match input {
                    Value::Null => return Ok(Value::Array(Vec::new())),
                    Value::Array(items) => items,
                    other => {
                        return Err(DomainError::ValueShape {
                            path: path.to_string(),
                            reason: format!("expected an array, found {}", kind_of(other)),
                        });
                    }
                };

                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let item_path = format!("{path}[{i}]");
                        match (item, *element_nullable) {
                            (Value::Null, true) => Ok(Value::Null),
                            (Value::Null, false) => Err(DomainError::ValueShape {
                                path: item_path,
                                reason: "non-nullable element is null".into(),
                            }),
                            _ => self.map_entity(element_entity, item, &item_path),
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            HelperStrategy::Unsupported => {
                let empty = match helper.form {
                    ContainerForm::Dictionary => Value::Object(Map::new()),
                    ContainerForm::Array | ContainerForm::Collection => Value::Array(Vec::new()),
                };
                let is_empty = match input {
                    Value::Null => true,
                    Value::Object(map) => map.is_empty(),
                    Value::Array(items) => items.is_empty(),
                    _ => false,
                };
                Ok(if is_empty { empty } else { Value::Null })
            }
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::classifier::TypeClassifier;
    use crate::domain::conversion::{ConversionPlanner, HelperNames};
    use crate::domain::entities::{AggregateKind, EntitySchema, TypeDescriptor};
    use crate::domain::registry::{CustomTypeRule, DomainRegistry};
    use crate::domain::shape_builder::ShapeBuilder;

    const NS: &str = "Acme.Domain";

    fn prim(name: &str) -> TypeDescriptor {
        TypeDescriptor::primitive("", name)
    }

    fn code() -> TypeDescriptor {
        TypeDescriptor::aggregate(NS, "AssetCode", AggregateKind::Struct)
    }

    fn asset() -> TypeDescriptor {
        TypeDescriptor::aggregate(NS, "CompanyAsset", AggregateKind::Class)
    }

    fn mapper() -> DtoMapper {
        let entities = vec![
            EntitySchema::new(NS, "AssetCode", AggregateKind::Struct)
                .with_field("Code", prim("string")),
            EntitySchema::new(NS, "CompanyAsset", AggregateKind::Class)
                .with_field("Name", prim("string"))
                .with_field("AssetCode", code()),
            EntitySchema::new(NS, "Owner", AggregateKind::Class)
                .with_field("Id", prim("int"))
                .with_field("Backup", code().nullable())
                .with_field(
                    "Assets",
                    TypeDescriptor::generic("", "List", vec![asset()]).nullable(),
                )
                .with_field("Spares", TypeDescriptor::array(asset().nullable()))
                .with_field(
                    "ByTag",
                    TypeDescriptor::generic("", "Dictionary", vec![prim("string"), asset()]),
                ),
        ];

        let registry = DomainRegistry::build(CustomTypeRule::Registry, &entities, |_| None);
        let shapes = ShapeBuilder::new(TypeClassifier::new(&registry), "Dtos");
        let planner = ConversionPlanner::new(&shapes);
        let mut names = HelperNames::new();
        DtoMapper::new(entities.iter().map(|e| planner.plan(e, &mut names)).collect::<Vec<_>>())
    }

    fn asset_value(name: &str) -> Value {
        json!({ "Name": name, "AssetCode": { "Code": format!("{name}-1") } })
    }

    #[test]
    fn copies_and_converts_nested_entities() {
        let dto = mapper()
            .map("Acme.Domain.CompanyAsset", &asset_value("Laptop"))
            .unwrap();
        assert_eq!(dto, asset_value("Laptop"));
    }

    #[test]
    fn absent_nullable_stays_absent() {
        let dto = mapper()
            .map("Acme.Domain.Owner", &json!({ "Id": 1, "Backup": null }))
            .unwrap();
        assert_eq!(dto["Backup"], Value::Null);
        assert_eq!(dto["Id"], json!(1));
    }

    #[test]
    fn present_nullable_is_converted() {
        let dto = mapper()
            .map("Acme.Domain.Owner", &json!({ "Id": 1, "Backup": { "Code": "X" } }))
            .unwrap();
        assert_eq!(dto["Backup"], json!({ "Code": "X" }));
    }

    #[test]
    fn absent_collections_become_empty() {
        let dto = mapper().map("Acme.Domain.Owner", &json!({ "Id": 1 })).unwrap();
        assert_eq!(dto["Assets"], json!([]));
        assert_eq!(dto["Spares"], json!([]));
        assert_eq!(dto["ByTag"], json!({}));
    }

    #[test]
    fn collections_preserve_order_and_count() {
        let value = json!({
            "Id": 1,
            "Assets": [asset_value("a"), asset_value("b"), asset_value("c")],
            "Spares": [asset_value("s"), null],
        });
        let dto = mapper().map("Acme.Domain.Owner", &value).unwrap();

        assert_eq!(
            dto["Assets"],
            json!([asset_value("a"), asset_value("b"), asset_value("c")])
        );
        assert_eq!(dto["Spares"], json!([asset_value("s"), null]));
    }

    #[test]
    fn non_empty_dictionary_with_custom_value_is_placeholder() {
        let value = json!({ "Id": 1, "ByTag": { "x": asset_value("x") } });
        let dto = mapper().map("Acme.Domain.Owner", &value).unwrap();
        assert_eq!(dto["ByTag"], Value::Null);

        let empty = json!({ "Id": 1, "ByTag": {} });
        let dto = mapper().map("Acme.Domain.Owner", &empty).unwrap();
        assert_eq!(dto["ByTag"], json!({}));
    }

    #[test]
    fn null_required_entity_is_an_error() {
        let err = mapper()
            .map("Acme.Domain.CompanyAsset", &json!({ "Name": "x" }))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::ValueShape { ref path, .. } if path == "Acme.Domain.CompanyAsset.AssetCode"
        ));
    }

    #[test]
    fn unknown_entity_is_reported() {
        let err = mapper().map("Acme.Domain.Ghost", &json!({})).unwrap_err();
        assert_eq!(err, DomainError::UnknownEntity("Acme.Domain.Ghost".into()));
    }

    #[test]
    fn wrong_collection_shape_is_rejected() {
        let err = mapper()
            .map("Acme.Domain.Owner", &json!({ "Id": 1, "Assets": 3 }))
            .unwrap_err();
        assert!(matches!(err, DomainError::ValueShape { .. }));
    }
}
