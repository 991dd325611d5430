//! CLI Argument Structures
//!
//! This module contains the CLI argument definitions, command structures,
//! and output format enum used by the modlens binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use modlens_rs::ReportFormat;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Single-file modularity analysis for Python
#[derive(Parser)]
#[command(name = "modlens")]
#[command(version = VERSION)]
#[command(about = "Modlens - modularity analysis and refactor plans for one Python file")]
#[command(long_about = "
Analyze one Python file for size, complexity, duplication and cohesion
problems, and get a concrete refactor plan for each issue found.

Common Usage:

  # Human-readable analysis of a file
  modlens analyze app/services.py

  # Machine-readable report written to disk
  modlens analyze app/services.py --format json --out report.json

  # Analyze source from stdin
  cat app/services.py | modlens analyze -

  # Start MCP server for IDE integration
  modlens mcp-stdio
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one Python file
    Analyze(AnalyzeArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Validate a modlens configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),

    /// Run MCP server over stdio
    #[command(name = "mcp-stdio")]
    McpStdio(McpStdioArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Python file to analyze, or `-` to read from stdin
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output format: json, yaml, text (plain summary) or pretty (tables)
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Path to configuration file to validate
    #[arg(short, long, required = true)]
    pub config: PathBuf,
}

#[derive(Args)]
pub struct McpStdioArgs {
    /// Configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON format output
    Json,
    /// YAML format output
    Yaml,
    /// Plain-text summary with refactoring previews
    Text,
    /// Human-readable tables
    Pretty,
}

impl OutputFormat {
    /// Report format rendered by the library, `None` for the table display.
    pub fn report_format(self) -> Option<ReportFormat> {
        match self {
            OutputFormat::Json => Some(ReportFormat::Json),
            OutputFormat::Yaml => Some(ReportFormat::Yaml),
            OutputFormat::Text => Some(ReportFormat::Text),
            OutputFormat::Pretty => None,
        }
    }
}
