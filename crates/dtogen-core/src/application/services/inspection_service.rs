//! Inspection Service - explain classification without generating code.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{MarkerScanner, SchemaProvider},
        services::generation_service::GenerationOptions,
    },
    domain::{
        Classification, DomainRegistry, DomainValidator as validator, EntitySchema, ShapeBuilder,
        TypeClassifier, TypeHandle,
    },
    error::DtogenResult,
};

/// How one field will be treated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInspection {
    pub name: String,
    pub declared_type: String,
    pub classification: Classification,
    pub dto_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityInspection {
    pub entity: String,
    pub kind: String,
    pub dto_name: String,
    pub dto_namespace: String,
    pub fields: Vec<FieldInspection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InspectionReport {
    pub entities: Vec<EntityInspection>,
    pub skipped: Vec<String>,
}

pub struct InspectionService {
    scanner: Option<Box<dyn MarkerScanner>>,
    provider: Box<dyn SchemaProvider>,
    options: GenerationOptions,
}

impl InspectionService {
    pub fn new(provider: Box<dyn SchemaProvider>) -> Self {
        Self {
            scanner: None,
            provider,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_scanner(mut self, scanner: Box<dyn MarkerScanner>) -> Self {
        self.scanner = Some(scanner);
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Inspect every marked type.
    pub fn inspect(&self) -> DtogenResult<InspectionReport> {
        let scanner = self
            .scanner
            .as_ref()
            .ok_or(ApplicationError::AdapterNotConfigured {
                name: "marker scanner",
            })?;
        let handles = scanner.scan()?;
        self.inspect_handles(&handles)
    }

    #[instrument(skip_all, fields(candidates = handles.len()))]
    pub fn inspect_handles(&self, handles: &[TypeHandle]) -> DtogenResult<InspectionReport> {
        let mut report = InspectionReport::default();
        let mut entities: Vec<EntitySchema> = Vec::new();

        for handle in handles {
            match self.provider.resolve(handle) {
                Some(entity) => {
                    validator::validate_entity(&entity)?;
                    entities.push(entity);
                }
                None => report.skipped.push(handle.to_string()),
            }
        }

        let registry =
            DomainRegistry::build(self.options.rule, &entities, |h| self.provider.resolve(h));
        let classifier = TypeClassifier::new(&registry);
        let shapes = ShapeBuilder::new(classifier, &self.options.dto_namespace_suffix);

        for entity in &entities {
            let fields = entity
                .fields()
                .iter()
                .map(|field| {
                    let classification = classifier.classify(field, entity.namespace());
                    let dto = shapes.build_dto_field(classification, field, entity.namespace());
                    FieldInspection {
                        name: field.name.clone(),
                        declared_type: field.declared_type.to_string(),
                        classification,
                        dto_type: dto.full_type_text(),
                    }
                })
                .collect();

            debug!(entity = %entity.qualified_name(), "Entity inspected");
            report.entities.push(EntityInspection {
                entity: entity.qualified_name(),
                kind: entity.kind().to_string(),
                dto_name: entity.dto_name(),
                dto_namespace: shapes.dto_namespace(entity.namespace()),
                fields,
            });
        }

        Ok(report)
    }
}
