use serde::{Deserialize, Serialize};

use crate::domain::conversion::{AuxiliaryConversion, ConversionPlan};
use crate::domain::shape_builder::DtoTypeDecl;

/// One piece of a generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "fragment", rename_all = "kebab-case")]
pub enum Fragment {
    DtoType(DtoTypeDecl),
    PrimaryConversion(ConversionPlan),
    AuxiliaryConversion(AuxiliaryConversion),
}

/// The abstract output for one entity: its DTO type, the primary conversion,
/// then one auxiliary conversion per container field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDocument {
    /// `<Entity>Dto`; also the emitted document name.
    pub name: String,
    pub namespace: String,
    /// Qualified name of the source entity.
    pub source_entity: String,
    pub fragments: Vec<Fragment>,
}

impl CodeDocument {
    /// Assemble the document in fragment order.
    pub fn assemble(dto: DtoTypeDecl, plan: ConversionPlan) -> Self {
        let mut fragments = Vec::with_capacity(2 + plan.auxiliaries.len());
        let auxiliaries = plan.auxiliaries.clone();

        let name = dto.name.clone();
        let namespace = dto.namespace.clone();
        let source_entity = dto.source_entity.clone();

        fragments.push(Fragment::DtoType(dto));
        fragments.push(Fragment::PrimaryConversion(plan));
        fragments.extend(auxiliaries.into_iter().map(Fragment::AuxiliaryConversion));

        Self {
            name,
            namespace,
            source_entity,
            fragments,
        }
    }

    pub fn dto_type(&self) -> Option<&DtoTypeDecl> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::DtoType(decl) => Some(decl),
            _ => None,
        })
    }

    pub fn primary(&self) -> Option<&ConversionPlan> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::PrimaryConversion(plan) => Some(plan),
            _ => None,
        })
    }

    pub fn auxiliaries(&self) -> impl Iterator<Item = &AuxiliaryConversion> {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::AuxiliaryConversion(aux) => Some(aux),
            _ => None,
        })
    }
}

/// Counts and timing for one run, rendered as the `GenerationSummary` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub documents: usize,
    pub helpers: usize,
    pub skipped: usize,
    pub diagnostics: usize,
    pub elapsed_ms: u128,
}

impl RunSummary {
    /// Emitted document name.
    pub const DOCUMENT_NAME: &'static str = "GenerationSummary";
}
