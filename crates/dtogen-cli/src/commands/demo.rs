//! `dtogen demo`: generate for the built-in HR sample and map a sample value.

use serde_json::{Value, json};

use dtogen_adapters::{CollectingDiagnostics, InMemoryDomain, MemorySink, builtin_domain};
use dtogen_core::prelude::*;

use super::resolve_renderer;
use crate::{
    cli::{DemoArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

const FEATURED: &str = "Employee";

pub fn execute(
    args: DemoArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let domain = InMemoryDomain::with_builtin()?;
    let kind = resolve_renderer(args.format, &config)?;
    let sink = MemorySink::new();

    let report = GenerationService::new(
        Box::new(domain.clone()),
        kind.create(),
        Box::new(sink.clone()),
        Box::new(CollectingDiagnostics::new()),
    )
    .with_scanner(Box::new(domain))
    .with_options(config.generation_options(None))
    .run()?;

    let document_name = format!("{FEATURED}Dto");
    let document = sink.get(&document_name).ok_or_else(|| CliError::InvalidInput {
        message: format!("the sample domain produced no '{document_name}' document"),
        source: None,
    })?;

    output.header(&format!(
        "Generated {} documents; showing {document_name}:",
        sink.len()
    ))?;
    output.emit(&document)?;

    let entity = format!("{}.{FEATURED}", builtin_domain::NAMESPACE);
    let dto = report
        .mapper()
        .map(&entity, &sample_employee())
        .map_err(DtogenError::from)?;
    let json = serde_json::to_string_pretty(&dto)
        .map_err(std::io::Error::from)
        .with_cli_context(|| "Failed to serialise the sample DTO")?;

    output.header("Sample employee mapped to its DTO:")?;
    output.emit(&json)?;
    Ok(())
}

fn sample_employee() -> Value {
    json!({
        "Id": "8d5e6c1a-3f0b-4a52-9a0e-1b2c3d4e5f60",
        "Name": "Test employee",
        "DateOfBirth": "1990-05-17T00:00:00",
        "DateOfJoining": "2021-03-01T00:00:00",
        "AssetsAllocated": [
            { "Name": "Laptop", "Worth": 1499.99, "AssetCode": { "Code": "IT-LT-001" } },
            { "Name": "Phone", "Worth": 799.0, "AssetCode": { "Code": "IT-PH-014" } }
        ],
        "Address": { "StreetName": "Baker Street", "HouseNumber": 221, "PostCode": "NW1 6XE" },
        "HolidayBalance": { "Balance": 25.0 },
        "PromotionCodes": { "100": "TEST" }
    })
}
