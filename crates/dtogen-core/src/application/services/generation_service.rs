//! Generation Service - the generation driver.
//!
//! One call to [`GenerationService::run`] is one generation run:
//! 1. Pull candidate handles from the marker scanner
//! 2. Resolve and validate every candidate
//! 3. Build the per-run registry
//! 4. Classify, shape, plan, render, and emit each entity
//! 5. Emit the run summary
//!
//! Everything derived during a run (registry, helper counter, plans) is
//! dropped at the end of it.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::ports::{CodeRenderer, DiagnosticSink, EmissionSink, MarkerScanner, SchemaProvider},
    domain::{
        CodeDocument, ConversionPlan, ConversionPlanner, CustomTypeRule, DEFAULT_DTO_NAMESPACE_SUFFIX,
        Diagnostic, DomainRegistry, DomainValidator as validator, DtoMapper, EntitySchema,
        HelperNames, RunSummary, ShapeBuilder, TypeClassifier, TypeHandle, registry::aggregates_in,
    },
    error::DtogenResult,
};

/// Knobs for a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub rule: CustomTypeRule,
    pub dto_namespace_suffix: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            rule: CustomTypeRule::default(),
            dto_namespace_suffix: DEFAULT_DTO_NAMESPACE_SUFFIX.to_string(),
        }
    }
}

/// A rendered document as handed to the emission sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedDocument {
    pub name: String,
    pub text: String,
}

/// Outcome of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub run_id: Uuid,
    /// Entity documents, in candidate order. The summary is not included.
    pub documents: Vec<EmittedDocument>,
    pub plans: Vec<ConversionPlan>,
    pub diagnostics: Vec<Diagnostic>,
    /// Candidates the provider could not resolve.
    pub skipped: Vec<TypeHandle>,
    /// `None` when nothing was generated (no scanner configured).
    pub summary: Option<RunSummary>,
    pub elapsed: Duration,
}

impl GenerationReport {
    fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            documents: Vec::new(),
            plans: Vec::new(),
            diagnostics: Vec::new(),
            skipped: Vec::new(),
            summary: None,
            elapsed: Duration::ZERO,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn helper_count(&self) -> usize {
        self.plans.iter().map(|p| p.auxiliaries.len()).sum()
    }

    /// Reference mapper over this run's plans.
    pub fn mapper(&self) -> DtoMapper {
        DtoMapper::new(self.plans.iter().cloned())
    }
}

/// The generation driver.
pub struct GenerationService {
    scanner: Option<Box<dyn MarkerScanner>>,
    provider: Box<dyn SchemaProvider>,
    renderer: Box<dyn CodeRenderer>,
    sink: Box<dyn EmissionSink>,
    diagnostics: Box<dyn DiagnosticSink>,
    options: GenerationOptions,
}

impl GenerationService {
    /// Create a generation service with the given adapters.
    ///
    /// No scanner is attached; see [`with_scanner`](Self::with_scanner).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use dtogen_core::application::GenerationService;
    ///
    /// let service = GenerationService::new(
    ///     provider,    // impl SchemaProvider
    ///     renderer,    // impl CodeRenderer
    ///     sink,        // impl EmissionSink
    ///     diagnostics, // impl DiagnosticSink
    /// )
    /// .with_scanner(scanner);
    /// let report = service.run()?;
    /// ```
    pub fn new(
        provider: Box<dyn SchemaProvider>,
        renderer: Box<dyn CodeRenderer>,
        sink: Box<dyn EmissionSink>,
        diagnostics: Box<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            scanner: None,
            provider,
            renderer,
            sink,
            diagnostics,
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

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Run generation over whatever the marker scanner reports.
    ///
    /// Without a scanner this is a soft failure: one `DTOGEN001` error
    /// diagnostic, no documents, `Ok`.
    pub fn run(&self) -> DtogenResult<GenerationReport> {
        let Some(scanner) = &self.scanner else {
            let mut report = GenerationReport::new(Uuid::new_v4());
            warn!("No marker scanner configured");
            self.diagnose(&mut report, Diagnostic::missing_receiver());
            return Ok(report);
        };

        let handles = scanner.scan()?;
        self.generate(&handles)
    }

    /// Run generation for an explicit candidate list.
    #[instrument(skip_all, fields(candidates = handles.len(), rule = %self.options.rule))]
    pub fn generate(&self, handles: &[TypeHandle]) -> DtogenResult<GenerationReport> {
        let started = Instant::now();
        let mut report = GenerationReport::new(Uuid::new_v4());
        info!(run_id = %report.run_id, "Generation run started");

        // 1. Resolve candidates
        let entities = self.resolve_candidates(handles, &mut report);

        // 2. Validate the provider's contract
        for entity in &entities {
            validator::validate_entity(entity)?;
        }

        // 3. Registry for this run
        let registry =
            DomainRegistry::build(self.options.rule, &entities, |h| self.provider.resolve(h));
        debug!(known = registry.len(), "Domain registry built");

        // 4. Per entity
        let shapes = ShapeBuilder::new(
            TypeClassifier::new(&registry),
            &self.options.dto_namespace_suffix,
        );
        let planner = ConversionPlanner::new(&shapes);
        let mut names = HelperNames::new();
        let mut owners: BTreeMap<String, String> = BTreeMap::new();

        for entity in &entities {
            let qualified = entity.qualified_name();
            if let Some(kept) = owners.get(&entity.dto_name()) {
                warn!(entity = %qualified, kept = %kept, "Document name already taken");
                self.diagnose(
                    &mut report,
                    Diagnostic::duplicate_document(&entity.dto_name(), kept, &qualified),
                );
                report.skipped.push(TypeHandle::new(qualified));
                continue;
            }
            owners.insert(entity.dto_name(), qualified);

            let dto = shapes.build_dto_type(entity);
            let plan = planner.plan(entity, &mut names);

            for helper in plan.unsupported_auxiliaries() {
                self.diagnose(
                    &mut report,
                    Diagnostic::unsupported_conversion(
                        entity.simple_name(),
                        &helper.field,
                        &helper.source_type_text,
                    ),
                );
            }
            self.check_references(entity, &registry, &mut report);
            self.check_copied_fields(entity, &plan, &registry, &mut report);

            let document = CodeDocument::assemble(dto, plan.clone());
            let text = self.renderer.render_document(&document)?;
            self.sink.add_document(&document.name, &text)?;
            debug!(
                entity = %entity.qualified_name(),
                document = %document.name,
                helpers = plan.auxiliaries.len(),
                "Document emitted"
            );

            report.documents.push(EmittedDocument {
                name: document.name,
                text,
            });
            report.plans.push(plan);
        }

        // 5. Summary
        report.elapsed = started.elapsed();
        let summary = RunSummary {
            run_id: report.run_id.to_string(),
            documents: report.documents.len(),
            helpers: names.issued(),
            skipped: report.skipped.len(),
            diagnostics: report.diagnostics.len(),
            elapsed_ms: report.elapsed.as_millis(),
        };
        self.sink
            .add_document(RunSummary::DOCUMENT_NAME, &self.renderer.render_summary(&summary))?;
        report.summary = Some(summary);

        info!(
            run_id = %report.run_id,
            documents = report.documents.len(),
            skipped = report.skipped.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Generation run completed"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn resolve_candidates(
        &self,
        handles: &[TypeHandle],
        report: &mut GenerationReport,
    ) -> Vec<EntitySchema> {
        let mut seen = BTreeSet::new();
        let mut entities = Vec::with_capacity(handles.len());

        for handle in handles {
            if !seen.insert(handle) {
                debug!(handle = %handle, "Duplicate candidate ignored");
                continue;
            }
            match self.provider.resolve(handle) {
                Some(entity) => entities.push(entity),
                None => {
                    self.diagnose(report, Diagnostic::unresolvable(handle.as_str()));
                    report.skipped.push(handle.clone());
                }
            }
        }

        entities
    }

    /// Warn about domain types referenced by `entity` that are not marked.
    fn check_references(
        &self,
        entity: &EntitySchema,
        registry: &DomainRegistry,
        report: &mut GenerationReport,
    ) {
        for field in entity.fields() {
            let mut reported = BTreeSet::new();
            for referenced in aggregates_in(&field.declared_type) {
                let name = referenced.qualified_name();
                if registry.is_custom(referenced, entity.namespace())
                    && !registry.is_marked(&name)
                    && reported.insert(name.clone())
                {
                    self.diagnose(
                        report,
                        Diagnostic::unmarked_reference(entity.simple_name(), &field.name, &name),
                    );
                }
            }
        }
    }

    /// Note copied fields that still carry domain types at depth.
    fn check_copied_fields(
        &self,
        entity: &EntitySchema,
        plan: &ConversionPlan,
        registry: &DomainRegistry,
        report: &mut GenerationReport,
    ) {
        for field in entity.fields() {
            if !plan.direct_fields.contains(&field.name) {
                continue;
            }
            let nested = aggregates_in(&field.declared_type)
                .into_iter()
                .find(|ty| registry.is_custom(ty, entity.namespace()));
            if let Some(nested) = nested {
                self.diagnose(
                    report,
                    Diagnostic::nested_domain_type(
                        entity.simple_name(),
                        &field.name,
                        &nested.qualified_name(),
                    ),
                );
            }
        }
    }

    fn diagnose(&self, report: &mut GenerationReport, diagnostic: Diagnostic) {
        self.diagnostics.report(&diagnostic);
        report.diagnostics.push(diagnostic);
    }
}
