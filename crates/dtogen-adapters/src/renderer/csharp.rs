//! C# renderer.
//!
//! Each document becomes one `.g.cs` file:
//!
//! ```text
//! namespace <Entity namespace>.Dtos
//! {
//!     public class EmployeeDto { ...properties... }
//!
//!     public static class EmployeeDtoExtensions
//!     {
//!         public static EmployeeDto ToDto(this Employee entity) { ... }
//!         private static ... EmployeeAssetsAllocatedToDto1(...) { ... }
//!     }
//! }
//! ```

use tracing::instrument;

use dtogen_core::{
    application::{ApplicationError, ports::CodeRenderer},
    domain::{
        AggregateKind, AuxiliaryConversion, CodeDocument, ContainerForm, ConversionPlan, DtoTypeDecl,
        FieldConversion, HelperStrategy, RunSummary,
    },
    error::DtogenResult,
};

const HEADER: &str = "// <auto-generated />";
const INDENT: &str = "    ";
const USINGS: &[&str] = &["System", "System.Collections.Generic", "System.Linq"];

/// Renders DTO classes/structs and `ToDto` extension methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpRenderer;

impl CSharpRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl CodeRenderer for CSharpRenderer {
    fn file_extension(&self) -> &'static str {
        "cs"
    }

    fn render_dto_type(&self, dto: &DtoTypeDecl) -> String {
        // Struct members cannot carry initializers without a declared constructor.
        let initialized = dto.kind == AggregateKind::Class;

        let mut w = CodeWriter::default();
        w.line(format!("public {} {}", dto.kind, dto.name));
        w.open();
        for field in &dto.fields {
            let initializer = if initialized && !field.nullable {
                " = default!;"
            } else {
                ""
            };
            w.line(format!(
                "public {} {} {{ get; set; }}{initializer}",
                field.full_type_text(),
                field.name
            ));
        }
        w.close();
        w.finish()
    }

    fn render_primary(&self, plan: &ConversionPlan) -> String {
        let mut w = CodeWriter::default();
        w.line(format!(
            "public static {} ToDto(this {} entity)",
            plan.dto_name, plan.entity_name
        ));
        w.open();
        w.line(format!("var dto = new {}();", plan.dto_name));
        for assignment in &plan.assignments {
            let source = format!("entity.{}", assignment.field);
            let value = match &assignment.conversion {
                FieldConversion::Copy => source,
                FieldConversion::Convert { .. } => format!("{source}.ToDto()"),
                FieldConversion::ConvertIfPresent { .. } => format!("{source}?.ToDto()"),
                FieldConversion::Helper { name } => format!("{name}({source})"),
            };
            w.line(format!("dto.{} = {value};", assignment.field));
        }
        w.line("return dto;");
        w.close();
        w.finish()
    }

    fn render_auxiliary(&self, helper: &AuxiliaryConversion) -> String {
        let result = &helper.result_type_text;

        let mut w = CodeWriter::default();
        w.line(format!(
            "private static {result} {}({}? source)",
            helper.name, helper.source_type_text
        ));
        w.open();

        match &helper.strategy {
            HelperStrategy::MapElements {
                element_nullable, ..
            } => {
                let selector = if *element_nullable {
                    "x => x?.ToDto()"
                } else {
                    "x => x.ToDto()"
                };
                w.line("if (source is null)");
                w.open();
                w.line(format!("return {};", empty_value(helper)));
                w.close();
                w.blank();

                let mapped = match helper.form {
                    ContainerForm::Array => format!("source.Select({selector}).ToArray()"),
                    _ if builds_list(&helper.container) => {
                        format!("source.Select({selector}).ToList()")
                    }
                    _ => format!("new {result}(source.Select({selector}))"),
                };
                w.line(format!("return {mapped};"));
            }
            // Multi-argument containers need not be enumerable or constructible.
            HelperStrategy::Unsupported if helper.form == ContainerForm::Collection => {
                w.line("// Entries with domain-typed arguments are not converted.");
                w.line("return default!;");
            }
            HelperStrategy::Unsupported => {
                let is_empty = match helper.form {
                    ContainerForm::Array => "source.Length == 0",
                    _ => "source.Count == 0",
                };
                w.line(format!("if (source is null || {is_empty})"));
                w.open();
                w.line(format!("return {};", empty_value(helper)));
                w.close();
                w.blank();
                w.line("// Entries with domain-typed arguments are not converted.");
                w.line("return null!;");
            }
        }

        w.close();
        w.finish()
    }

    #[instrument(skip_all, fields(document = %document.name))]
    fn render_document(&self, document: &CodeDocument) -> DtogenResult<String> {
        let failed = |reason: &str| ApplicationError::RenderingFailed {
            name: document.name.clone(),
            reason: reason.to_string(),
        };
        let dto = document.dto_type().ok_or_else(|| failed("missing DTO type"))?;
        let plan = document
            .primary()
            .ok_or_else(|| failed("missing primary conversion"))?;

        let mut w = CodeWriter::default();
        w.line(HEADER);
        w.line("#nullable enable");
        w.blank();
        for using in USINGS {
            w.line(format!("using {using};"));
        }
        for import in &plan.imports {
            if *import != document.namespace && !USINGS.contains(&import.as_str()) {
                w.line(format!("using {import};"));
            }
        }
        w.blank();

        let scoped = !document.namespace.is_empty();
        if scoped {
            w.line(format!("namespace {}", document.namespace));
            w.open();
        }

        w.block(&self.render_dto_type(dto));
        w.blank();
        w.line(format!("public static class {}Extensions", dto.name));
        w.open();
        w.block(&self.render_primary(plan));
        for helper in document.auxiliaries() {
            w.blank();
            w.block(&self.render_auxiliary(helper));
        }
        w.close();

        if scoped {
            w.close();
        }
        Ok(w.finish())
    }

    fn render_summary(&self, summary: &RunSummary) -> String {
        let mut w = CodeWriter::default();
        w.line(HEADER);
        w.line("// dtogen generation summary");
        w.line("//");
        w.line(format!("// Run:         {}", summary.run_id));
        w.line(format!("// Documents:   {}", summary.documents));
        w.line(format!("// Helpers:     {}", summary.helpers));
        w.line(format!("// Skipped:     {}", summary.skipped));
        w.line(format!("// Diagnostics: {}", summary.diagnostics));
        w.line(format!("// Elapsed:     {} ms", summary.elapsed_ms));
        w.finish()
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `IReadOnlyCollection`, `IList`, ... (interface naming convention).
fn is_interface(container: &str) -> bool {
    let mut chars = container.chars();
    chars.next() == Some('I') && chars.next().is_some_and(char::is_uppercase)
}

fn builds_list(container: &str) -> bool {
    container == "List" || is_interface(container)
}

/// Text between the outermost angle brackets.
fn generic_arguments(type_text: &str) -> &str {
    match (type_text.find('<'), type_text.rfind('>')) {
        (Some(start), Some(end)) if start < end => &type_text[start + 1..end],
        _ => "",
    }
}

fn empty_value(helper: &AuxiliaryConversion) -> String {
    let result = &helper.result_type_text;
    match helper.form {
        ContainerForm::Array => {
            let element = result.strip_suffix("[]").unwrap_or(result);
            format!("Array.Empty<{element}>()")
        }
        ContainerForm::Collection if is_interface(&helper.container) => {
            format!("new List<{}>()", generic_arguments(result))
        }
        ContainerForm::Dictionary if is_interface(&helper.container) => {
            format!("new Dictionary<{}>()", generic_arguments(result))
        }
        _ => format!("new {result}()"),
    }
}

/// Line-oriented writer with brace-block indentation.
#[derive(Default)]
struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// Re-indent pre-rendered text at the current depth.
    fn block(&mut self, text: &str) {
        for line in text.lines() {
            if line.is_empty() {
                self.blank();
            } else {
                self.line(line);
            }
        }
    }

    fn finish(self) -> String {
        self.out
    }
}
