//! CLI argument definitions
//!
//! All Clap derive structs for `docs2schema` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;
use crate::schema::BlankLines;

// ============================================================================
// Root CLI
// ============================================================================

/// Convert configuration reference markdown into an editor JSON Schema.
#[derive(Parser, Debug)]
#[command(name = "docs2schema", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "DOCS2SCHEMA_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert markdown on stdin (or --input) into a JSON Schema on stdout.
    Generate(GenerateArgs),

    /// Parse and verify the input, reporting every problem without emitting a schema.
    Check(CheckArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Generate / Check
// ============================================================================

/// Arguments for `generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Read markdown from this file instead of stdin.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the schema to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report every translation failure instead of stopping at the first.
    #[arg(long)]
    pub collect_errors: bool,

    /// Parsing policy.
    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Read markdown from this file instead of stdin.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Report format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Parsing policy.
    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Policy options shared by `generate` and `check`.
///
/// Flags override values loaded from `--config`.
#[derive(Args, Debug, Default)]
pub struct PolicyArgs {
    /// Path to a YAML policy file.
    #[arg(short, long, env = "DOCS2SCHEMA_CONFIG")]
    pub config: Option<PathBuf>,

    /// How whitespace-only lines inside a section are treated.
    #[arg(long, env = "DOCS2SCHEMA_BLANK_LINES")]
    pub blank_lines: Option<BlankLines>,

    /// Emit descriptions that start with a code fence as empty strings.
    #[arg(long)]
    pub suppress_code_blocks: bool,

    /// Do not duplicate descriptions into `markdownDescription`.
    #[arg(long)]
    pub no_markdown_description: bool,

    /// Skip checking that every `$ref` names a defined section.
    #[arg(long)]
    pub no_verify_references: bool,

    /// Treat this reference name as an opaque object (repeatable).
    #[arg(long = "allow-unresolved", value_name = "NAME")]
    pub allow_unresolved: Vec<String>,

    /// Title of the definition targeted by the root `$ref`.
    #[arg(long, value_name = "TITLE")]
    pub root_definition: Option<String>,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: clap_complete::Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

// ============================================================================
// Tests
// ============================================================================
