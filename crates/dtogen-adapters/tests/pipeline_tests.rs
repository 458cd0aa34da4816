//! End-to-end runs of the generation service over the real adapters.

use std::fs;

use serde_json::json;
use tempfile::TempDir;

use dtogen_adapters::{
    CSharpRenderer, CollectingDiagnostics, DirectorySink, InMemoryDomain, JsonRenderer,
    MemorySink, builtin_domain,
};
use dtogen_core::prelude::*;

const ENTITY_DOCS: [&str; 5] = [
    "AddressDto",
    "AssetCodeDto",
    "CompanyAssetDto",
    "HolidayBalanceDto",
    "EmployeeDto",
];

fn service(
    domain: &InMemoryDomain,
    sink: &MemorySink,
    diagnostics: &CollectingDiagnostics,
) -> GenerationService {
    GenerationService::new(
        Box::new(domain.clone()),
        Box::new(CSharpRenderer::new()),
        Box::new(sink.clone()),
        Box::new(diagnostics.clone()),
    )
    .with_scanner(Box::new(domain.clone()))
}

fn qualified(name: &str) -> String {
    format!("{}.{name}", builtin_domain::NAMESPACE)
}

#[test]
fn sample_domain_generates_every_document_then_the_summary() {
    let domain = InMemoryDomain::with_builtin().unwrap();
    let sink = MemorySink::new();
    let diagnostics = CollectingDiagnostics::new();

    let report = service(&domain, &sink, &diagnostics).run().unwrap();

    let mut expected: Vec<&str> = ENTITY_DOCS.to_vec();
    expected.push("GenerationSummary");
    assert_eq!(sink.names(), expected);
    assert_eq!(report.documents.len(), 5);
    assert_eq!(report.helper_count(), 1);
    assert!(diagnostics.diagnostics().is_empty());
}

#[test]
fn employee_document_converts_nested_and_container_fields() {
    let domain = InMemoryDomain::with_builtin().unwrap();
    let sink = MemorySink::new();
    service(&domain, &sink, &CollectingDiagnostics::new())
        .run()
        .unwrap();

    let text = sink.get("EmployeeDto").unwrap();
    assert!(text.contains("namespace SourceGenerators.TestApp.Domain.Dtos"));
    assert!(text.contains("public IReadOnlyCollection<CompanyAssetDto> AssetsAllocated { get; set; }"));
    assert!(text.contains("public Dictionary<int, string> PromotionCodes { get; set; }"));
    assert!(text.contains("dto.Address = entity.Address.ToDto();"));
    assert!(text.contains("dto.HolidayBalance = entity.HolidayBalance.ToDto();"));
    assert!(text.contains("dto.PromotionCodes = entity.PromotionCodes;"));
    assert!(text.contains(
        "dto.AssetsAllocated = EmployeeAssetsAllocatedToDto1(entity.AssetsAllocated);"
    ));

    let asset_code = sink.get("AssetCodeDto").unwrap();
    assert!(asset_code.contains("public struct AssetCodeDto"));
}

#[test]
fn repeated_runs_emit_identical_documents() {
    let domain = InMemoryDomain::with_builtin().unwrap();

    let first = MemorySink::new();
    let second = MemorySink::new();
    service(&domain, &first, &CollectingDiagnostics::new())
        .run()
        .unwrap();
    service(&domain, &second, &CollectingDiagnostics::new())
        .run()
        .unwrap();

    for name in ENTITY_DOCS {
        assert_eq!(first.get(name), second.get(name), "{name} differs between runs");
    }
}

#[test]
fn report_mapper_converts_sample_values() {
    let domain = InMemoryDomain::with_builtin().unwrap();
    let report = service(&domain, &MemorySink::new(), &CollectingDiagnostics::new())
        .run()
        .unwrap();

    let employee = json!({
        "Id": "5f1c",
        "Name": "Ada",
        "DateOfBirth": "1990-01-01",
        "DateOfJoining": "2020-01-01",
        "AssetsAllocated": [
            { "Name": "Laptop", "Worth": 1200.5, "AssetCode": { "Code": "LT-1" } }
        ],
        "Address": { "StreetName": "Main", "HouseNumber": 1, "PostCode": "AB1" },
        "HolidayBalance": { "Balance": 25.0 },
        "PromotionCodes": { "100": "TEST" }
    });

    let dto = report
        .mapper()
        .map(&qualified("Employee"), &employee)
        .unwrap();
    assert_eq!(dto, employee);

    let mut without_assets = employee.clone();
    without_assets["AssetsAllocated"] = json!(null);
    let dto = report
        .mapper()
        .map(&qualified("Employee"), &without_assets)
        .unwrap();
    assert_eq!(dto["AssetsAllocated"], json!([]));
}

#[test]
fn manifest_with_domain_valued_dictionary_reports_and_renders_placeholder() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ledger.toml");
    fs::write(
        &path,
        r#"
[domain]
namespace = "Ledger"

[[types]]
name = "Entry"
fields = [{ name = "Amount", type = "decimal" }]

[[types]]
name = "Book"
fields = [
    { name = "Entries", type = "Dictionary<string, Entry>?" },
    { name = "Owner",   type = "Person" },
]

[[types]]
name = "Person"
marked = false
fields = [{ name = "Name", type = "string" }]
"#,
    )
    .unwrap();

    let domain = InMemoryDomain::from_paths(&[&path]).unwrap();
    let sink = MemorySink::new();
    let diagnostics = CollectingDiagnostics::new();
    let report = service(&domain, &sink, &diagnostics).run().unwrap();

    let codes: Vec<_> = report.diagnostics.iter().map(|d| d.code.id()).collect();
    assert_eq!(codes, ["DTOGEN003", "DTOGEN004"]);
    assert_eq!(diagnostics.count(Severity::Info), 1);
    assert!(!report.has_errors());

    let book = sink.get("BookDto").unwrap();
    assert!(book.contains("return null!;"));
    assert!(book.contains("public Dictionary<string, EntryDto>? Entries { get; set; }"));
}

#[test]
fn documents_import_namespaces_of_foreign_domain_types() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hr.toml");
    fs::write(
        &path,
        r#"
[domain]
namespace = "Acme.Hr"

[[types]]
name = "Money"
kind = "struct"
namespace = "Acme.Finance"
fields = [{ name = "Amount", type = "decimal" }]

[[types]]
name = "Employee"
fields = [
    { name = "Salary",  type = "Acme.Finance.Money" },
    { name = "Bonuses", type = "List<Acme.Finance.Money>" },
]
"#,
    )
    .unwrap();

    let domain = InMemoryDomain::from_paths(&[&path]).unwrap();
    let sink = MemorySink::new();
    let report = service(&domain, &sink, &CollectingDiagnostics::new())
        .run()
        .unwrap();
    assert!(report.diagnostics.is_empty());

    let employee = sink.get("EmployeeDto").unwrap();
    assert!(employee.contains("using Acme.Finance;\nusing Acme.Finance.Dtos;\nusing Acme.Hr;\n"));
    assert!(employee.contains("namespace Acme.Hr.Dtos"));
    assert!(employee.contains("public MoneyDto Salary { get; set; } = default!;"));
    assert!(employee.contains("public List<MoneyDto> Bonuses { get; set; } = default!;"));

    let money = sink.get("MoneyDto").unwrap();
    assert!(money.contains("public struct MoneyDto"));
    assert!(money.contains("public decimal Amount { get; set; }\n"));
    assert!(!money.contains("default!"));
    assert!(money.contains("using Acme.Finance;\n\nnamespace Acme.Finance.Dtos"));
}

#[test]
fn directory_sink_receives_g_files() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let domain = InMemoryDomain::with_builtin().unwrap();
    let sink = DirectorySink::new(&out, "json");

    GenerationService::new(
        Box::new(domain.clone()),
        Box::new(JsonRenderer::new()),
        Box::new(sink.clone()),
        Box::new(CollectingDiagnostics::new()),
    )
    .with_scanner(Box::new(domain))
    .run()
    .unwrap();

    assert_eq!(sink.written().len(), 6);
    let employee: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("EmployeeDto.g.json")).unwrap())
            .unwrap();
    assert_eq!(employee["name"], "EmployeeDto");
    assert_eq!(employee["fragments"][0]["fragment"], "dto-type");
    assert!(out.join("GenerationSummary.g.json").exists());
}
