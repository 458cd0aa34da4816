//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use dtogen_adapters::RendererKind;
use dtogen_core::domain::CustomTypeRule;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "dtogen",
    bin_name = "dtogen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Entity-to-DTO code generator",
    long_about = "dtogen reads a domain description, classifies every field of \
                  the marked entities, and generates DTO types with conversion \
                  code.",
    after_help = "EXAMPLES:\n\
        \x20 dtogen generate demos/employee.toml -o generated\n\
        \x20 dtogen generate domain/ --format json --stdout\n\
        \x20 dtogen inspect domain/ --format json\n\
        \x20 dtogen demo\n\
        \x20 dtogen completions bash > /usr/share/bash-completion/completions/dtogen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate DTOs from domain manifests.
    #[command(
        visible_alias = "gen",
        about = "Generate DTOs and conversions",
        after_help = "EXAMPLES:\n\
            \x20 dtogen generate demos/employee.toml\n\
            \x20 dtogen generate domain/ -o src/Generated --rule namespace-prefix\n\
            \x20 dtogen generate domain/ --dry-run"
    )]
    Generate(GenerateArgs),

    /// Explain how each field would be classified.
    #[command(
        about = "Show field classifications",
        after_help = "EXAMPLES:\n\
            \x20 dtogen inspect demos/employee.toml\n\
            \x20 dtogen inspect domain/ --format json"
    )]
    Inspect(InspectArgs),

    /// Run the generator over the built-in sample domain.
    #[command(about = "Generate for the built-in sample domain")]
    Demo(DemoArgs),

    /// Initialise a dtogen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 dtogen init\n\
            \x20 dtogen init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 dtogen completions bash > ~/.local/share/bash-completion/completions/dtogen\n\
            \x20 dtogen completions zsh  > ~/.zfunc/_dtogen\n\
            \x20 dtogen completions fish > ~/.config/fish/completions/dtogen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the dtogen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 dtogen config get generation.rule\n\
            \x20 dtogen config list\n\
            \x20 dtogen config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `dtogen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Manifest files or directories (directories are searched for `*.toml`).
    #[arg(value_name = "PATH", required = true, help = "Manifest files or directories")]
    pub paths: Vec<PathBuf>,

    /// Output directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: from config, else ./generated)"
    )]
    pub output: Option<PathBuf>,

    /// Target renderer.
    #[arg(long = "format", value_enum, help = "Output language")]
    pub format: Option<RenderFormat>,

    /// How domain types are recognised.
    #[arg(long = "rule", value_enum, help = "Custom-type rule")]
    pub rule: Option<RuleArg>,

    /// Print documents instead of writing files.
    #[arg(long = "stdout", help = "Print generated documents to stdout")]
    pub stdout: bool,

    /// Run the generator but write nothing.
    #[arg(
        long = "dry-run",
        conflicts_with = "stdout",
        help = "Show what would be generated without writing"
    )]
    pub dry_run: bool,
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `dtogen inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Manifest files or directories.
    #[arg(value_name = "PATH", required = true, help = "Manifest files or directories")]
    pub paths: Vec<PathBuf>,

    /// Report format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Report format"
    )]
    pub format: InspectFormat,

    /// How domain types are recognised.
    #[arg(long = "rule", value_enum, help = "Custom-type rule")]
    pub rule: Option<RuleArg>,
}

/// Output format for the `inspect` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    /// Human-readable table.
    Table,
    /// JSON document.
    Json,
}

// ── demo ──────────────────────────────────────────────────────────────────────

/// Arguments for `dtogen demo`.
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Target renderer.
    #[arg(long = "format", value_enum, help = "Output language")]
    pub format: Option<RenderFormat>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `dtogen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `dtogen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `dtogen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.rule`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Renderer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum RenderFormat {
    /// C# classes and extension methods. Also accepted as `cs`.
    #[value(alias = "cs")]
    CSharp,
    /// JSON dump of the conversion plan.
    Json,
}

impl From<RenderFormat> for RendererKind {
    fn from(format: RenderFormat) -> Self {
        match format {
            RenderFormat::CSharp => RendererKind::CSharp,
            RenderFormat::Json => RendererKind::Json,
        }
    }
}

/// Custom-type rule selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuleArg {
    /// Types known to the domain store.
    Registry,
    /// Types sharing the owner's namespace prefix.
    NamespacePrefix,
}

impl From<RuleArg> for CustomTypeRule {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::Registry => CustomTypeRule::Registry,
            RuleArg::NamespacePrefix => CustomTypeRule::NamespacePrefix,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "dtogen",
            "generate",
            "a.toml",
            "domain/",
            "-o",
            "out",
            "--format",
            "json",
            "--rule",
            "namespace-prefix",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.paths.len(), 2);
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert_eq!(args.format, Some(RenderFormat::Json));
        assert_eq!(args.rule, Some(RuleArg::NamespacePrefix));
    }

    #[test]
    fn csharp_alias() {
        let cli = Cli::parse_from(["dtogen", "demo", "--format", "cs"]);
        if let Commands::Demo(args) = cli.command {
            assert_eq!(args.format, Some(RenderFormat::CSharp));
        } else {
            panic!("expected Demo command");
        }
    }

    #[test]
    fn generate_requires_a_path() {
        assert!(Cli::try_parse_from(["dtogen", "generate"]).is_err());
    }

    #[test]
    fn stdout_and_dry_run_conflict() {
        let result =
            Cli::try_parse_from(["dtogen", "generate", "a.toml", "--stdout", "--dry-run"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["dtogen", "--quiet", "--verbose", "demo"]);
        assert!(result.is_err());
    }

    #[test]
    fn value_enums_map_to_core_types() {
        assert_eq!(RendererKind::from(RenderFormat::Json), RendererKind::Json);
        assert_eq!(
            CustomTypeRule::from(RuleArg::NamespacePrefix),
            CustomTypeRule::NamespacePrefix
        );
    }
}
