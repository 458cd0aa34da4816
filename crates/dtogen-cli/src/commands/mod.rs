//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod demo;
pub mod generate;
pub mod init;
pub mod inspect;

use std::path::PathBuf;

use tracing::debug;

use dtogen_adapters::{InMemoryDomain, RendererKind};

use crate::{
    cli::RenderFormat,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Load every manifest under `paths` into a fresh domain store.
///
/// Paths are checked up front so a typo reports "not found" rather than a
/// manifest error.
pub(crate) fn load_domain(paths: &[PathBuf]) -> CliResult<InMemoryDomain> {
    if let Some(missing) = paths.iter().find(|p| !p.exists()) {
        return Err(CliError::ManifestNotFound {
            path: missing.clone(),
        });
    }

    let domain = InMemoryDomain::from_paths(paths)?;
    debug!(types = domain.len(), "Domain loaded");
    Ok(domain)
}

/// `--format` wins, then `output.format` from the config.
pub(crate) fn resolve_renderer(
    flag: Option<RenderFormat>,
    config: &AppConfig,
) -> CliResult<RendererKind> {
    match flag {
        Some(format) => Ok(format.into()),
        None => config.renderer().map_err(|message| CliError::ConfigError {
            message: format!("output.format: {message}"),
            source: None,
        }),
    }
}

/// Comma-separated path list for messages.
pub(crate) fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
