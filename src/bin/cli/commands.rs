//! Command Execution Logic
//!
//! This module contains the command execution logic and configuration
//! loading for the modlens binary.

use std::path::Path;

use anyhow::Context;
use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::cli::args::*;
use crate::cli::output::emit_report;
use crate::mcp::server::McpServer;
use modlens_rs::{ModlensConfig, ModlensEngine};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name reported for source read from stdin
const STDIN_NAME: &str = "<stdin>";

/// Main analyze command implementation
pub async fn analyze_command(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = load_configuration(args.config.as_deref())?;
    let engine = ModlensEngine::new(config)?;

    let report = if args.file.as_os_str() == "-" {
        let mut source = String::new();
        tokio::io::stdin()
            .read_to_string(&mut source)
            .await
            .context("Failed to read source from stdin")?;
        engine.analyze_source(STDIN_NAME, &source)?
    } else {
        engine.analyze_file(&args.file)?
    };

    info!(
        "Analyzed {}: {} issue(s)",
        report.file_path, report.total_issues
    );
    emit_report(&report, args.format, args.out.as_deref())
}

/// Print default configuration in YAML format
pub async fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default modlens configuration".dimmed());
    println!("{}", "# Save this to a file and customize as needed".dimmed());
    println!("{}", "# Usage: modlens analyze --config your-config.yml FILE".dimmed());
    println!();

    let yaml_output = serde_yaml::to_string(&ModlensConfig::default())?;
    println!("{}", yaml_output);

    Ok(())
}

/// Validate a modlens configuration file
pub async fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "Validating configuration:".bright_blue().bold(),
        args.config.display().cyan()
    );
    println!();

    let config = match load_configuration(Some(&args.config)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "Configuration validation failed:".red(), e);
            println!();
            println!(
                "{}",
                "Tip: Use 'modlens print-default-config' to see the valid format".dimmed()
            );
            anyhow::bail!("invalid configuration: {}", args.config.display());
        }
    };

    println!("{}", "Configuration file is valid!".bright_green().bold());
    println!();

    #[derive(Tabled)]
    struct DetailRow {
        setting: String,
        value: String,
    }

    let detail_rows = vec![
        DetailRow {
            setting: "similarity.duplicate_threshold".to_string(),
            value: config.similarity.duplicate_threshold.to_string(),
        },
        DetailRow {
            setting: "thresholds.max_sloc".to_string(),
            value: config.thresholds.max_sloc.to_string(),
        },
        DetailRow {
            setting: "thresholds.max_functions".to_string(),
            value: config.thresholds.max_functions.to_string(),
        },
        DetailRow {
            setting: "thresholds.max_complexity".to_string(),
            value: config.thresholds.max_complexity.to_string(),
        },
        DetailRow {
            setting: "planner.target_maintainability".to_string(),
            value: config.planner.target_maintainability.to_string(),
        },
    ];

    let mut table = Table::new(detail_rows);
    table.with(TableStyle::rounded());
    println!("{}", table);

    Ok(())
}

/// Run MCP server over stdio
pub async fn mcp_stdio_command(args: McpStdioArgs) -> anyhow::Result<()> {
    eprintln!("Starting MCP stdio server...");

    let config = load_configuration(args.config.as_deref())?;
    let engine = ModlensEngine::new(config)?;
    McpServer::new(VERSION, engine).run().await
}

/// Load configuration from file or use defaults, validating either way
pub fn load_configuration(config_path: Option<&Path>) -> anyhow::Result<ModlensConfig> {
    let config = match config_path {
        Some(path) => ModlensConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ModlensConfig::default(),
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_config_path_uses_defaults() {
        let config = load_configuration(None).unwrap();
        assert_eq!(config, ModlensConfig::default());
    }

    #[test]
    fn partial_yaml_config_is_merged_with_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "thresholds:\n  max_sloc: 800").unwrap();

        let config = load_configuration(Some(file.path())).unwrap();
        assert_eq!(config.thresholds.max_sloc, 800);
        assert_eq!(config.thresholds.max_functions, 20);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "similarity:\n  duplicate_threshold: 1.5").unwrap();
        assert!(load_configuration(Some(file.path())).is_err());
    }
}
