//! JSON renderer: a `serde_json` dump of the abstract documents.
//!
//! Useful for tooling that wants the conversion plan rather than code.

use serde::Serialize;

use dtogen_core::{
    application::{ApplicationError, ports::CodeRenderer},
    domain::{AuxiliaryConversion, CodeDocument, ConversionPlan, DtoTypeDecl, RunSummary},
    error::DtogenResult,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

impl CodeRenderer for JsonRenderer {
    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn render_dto_type(&self, dto: &DtoTypeDecl) -> String {
        pretty(dto)
    }

    fn render_primary(&self, plan: &ConversionPlan) -> String {
        pretty(plan)
    }

    fn render_auxiliary(&self, helper: &AuxiliaryConversion) -> String {
        pretty(helper)
    }

    fn render_document(&self, document: &CodeDocument) -> DtogenResult<String> {
        let mut text = serde_json::to_string_pretty(document).map_err(|e| {
            ApplicationError::RenderingFailed {
                name: document.name.clone(),
                reason: e.to_string(),
            }
        })?;
        text.push('\n');
        Ok(text)
    }

    fn render_summary(&self, summary: &RunSummary) -> String {
        let mut text = pretty(summary);
        text.push('\n');
        text
    }
}
