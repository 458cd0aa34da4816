//! Implementation of the `dtogen inspect` command.

use dtogen_core::application::{EntityInspection, InspectionReport, InspectionService};

use super::load_domain;
use crate::{
    cli::{GlobalArgs, InspectArgs, InspectFormat},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(
    args: InspectArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let domain = load_domain(&args.paths)?;
    let report = InspectionService::new(Box::new(domain.clone()))
        .with_scanner(Box::new(domain))
        .with_options(config.generation_options(args.rule.map(Into::into)))
        .inspect()?;

    if args.format == InspectFormat::Json || output.is_json() {
        // Written directly so pipes always receive parseable JSON.
        let json = serde_json::to_string_pretty(&report)
            .map_err(std::io::Error::from)
            .with_cli_context(|| "Failed to serialise inspection report")?;
        output.emit(&json)?;
        return Ok(());
    }

    print_table(&report, &output)
}

fn print_table(report: &InspectionReport, output: &OutputManager) -> CliResult<()> {
    if report.entities.is_empty() {
        output.warning("No marked types found")?;
    }

    for entity in &report.entities {
        output.header(&format!(
            "{} ({}) -> {}.{}",
            entity.entity, entity.kind, entity.dto_namespace, entity.dto_name
        ))?;
        for line in table_rows(entity) {
            output.print(&line)?;
        }
        output.print("")?;
    }

    for handle in &report.skipped {
        output.warning(&format!("Skipped unresolvable type '{handle}'"))?;
    }

    Ok(())
}

/// One aligned line per field: name, declared type, classification, DTO type.
fn table_rows(entity: &EntityInspection) -> Vec<String> {
    let name_width = entity.fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
    let type_width = entity
        .fields
        .iter()
        .map(|f| f.declared_type.len())
        .max()
        .unwrap_or(0);

    entity
        .fields
        .iter()
        .map(|field| {
            format!(
                "  {:<name_width$}  {:<type_width$}  {:<22}  {}",
                field.name,
                field.declared_type,
                field.classification.as_str(),
                field.dto_type,
            )
        })
        .collect()
}
