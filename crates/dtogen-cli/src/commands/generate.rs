//! `dtogen generate`: run the generator over manifest files.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use dtogen_adapters::{
    CollectingDiagnostics, DirectorySink, MemorySink, RendererKind, TracingDiagnostics,
};
use dtogen_core::{
    application::GenerationReport,
    domain::RunSummary,
    prelude::*,
};

use super::{display_paths, load_domain, resolve_renderer};
use crate::{
    cli::{GenerateArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Machine-readable result for `--output-format json`.
#[derive(Debug, Serialize)]
struct GenerateOutcome<'a> {
    run_id: String,
    renderer: &'static str,
    dry_run: bool,
    documents: Vec<&'a str>,
    written: Vec<PathBuf>,
    diagnostics: &'a [Diagnostic],
    summary: Option<&'a RunSummary>,
}

#[instrument(skip_all, fields(paths = args.paths.len()))]
pub fn execute(
    args: GenerateArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let domain = load_domain(&args.paths)?;
    if domain.scan()?.is_empty() {
        return Err(CliError::NothingToGenerate {
            paths: display_paths(&args.paths),
        });
    }

    let kind = resolve_renderer(args.format, &config)?;
    let renderer = kind.create();
    let options = config.generation_options(args.rule.map(Into::into));
    let directory = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());

    let files = DirectorySink::new(&directory, renderer.file_extension());
    let memory = MemorySink::new();
    let sink: Box<dyn EmissionSink> = if args.stdout || args.dry_run {
        Box::new(memory.clone())
    } else {
        Box::new(files.clone())
    };

    // JSON mode keeps diagnostics in the structured log stream.
    let collected = CollectingDiagnostics::new();
    let diagnostics: Box<dyn DiagnosticSink> = if output.is_json() {
        Box::new(TracingDiagnostics::new())
    } else {
        Box::new(collected.clone())
    };

    info!(renderer = %kind, rule = %options.rule, "Starting generation");
    let report = GenerationService::new(Box::new(domain.clone()), renderer, sink, diagnostics)
        .with_scanner(Box::new(domain))
        .with_options(options)
        .run()?;

    if args.stdout {
        // Keep stdout to the generated code.
        for diagnostic in collected.diagnostics() {
            output.side_note(&diagnostic.to_string())?;
        }
        for document in &report.documents {
            output.emit(&document.text)?;
        }
        return Ok(());
    }

    if output.is_json() {
        return print_json(&report, kind, &files, args.dry_run, &output);
    }

    for diagnostic in collected.diagnostics() {
        let line = diagnostic.to_string();
        match diagnostic.severity {
            Severity::Error => output.error(&line)?,
            Severity::Warning => output.warning(&line)?,
            Severity::Info => output.info(&line)?,
        }
    }

    if args.dry_run {
        output.header(&format!(
            "Dry run: {} document(s) would be written to {}",
            report.documents.len(),
            directory.display()
        ))?;
        for document in &report.documents {
            output.print(&format!("  {}", files.path_for(&document.name).display()))?;
        }
        output.print(&format!(
            "  {}",
            files.path_for(RunSummary::DOCUMENT_NAME).display()
        ))?;
        return Ok(());
    }

    for path in files.written() {
        output.print(&format!("  {}", path.display()))?;
    }
    output.success(&format!(
        "Generated {} DTO(s) with {} helper(s) in {} ({} ms)",
        report.documents.len(),
        report.helper_count(),
        directory.display(),
        report.elapsed.as_millis()
    ))?;

    Ok(())
}

fn print_json(
    report: &GenerationReport,
    kind: RendererKind,
    files: &DirectorySink,
    dry_run: bool,
    output: &OutputManager,
) -> CliResult<()> {
    let outcome = GenerateOutcome {
        run_id: report.run_id.to_string(),
        renderer: kind.as_str(),
        dry_run,
        documents: report.documents.iter().map(|d| d.name.as_str()).collect(),
        written: files.written(),
        diagnostics: &report.diagnostics,
        summary: report.summary.as_ref(),
    };
    let json = serde_json::to_string_pretty(&outcome)
        .map_err(std::io::Error::from)
        .with_cli_context(|| "Failed to serialise generation report")?;
    output.emit(&json)?;
    Ok(())
}
