//! Modlens CLI - single-file modularity analysis for Python
//!
//! Analyzes one file and prints a report, or serves the analysis to IDE
//! clients over an MCP stdio server.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod mcp;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for reports and JSON-RPC
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze(args) => {
            cli::analyze_command(args).await?;
        }
        Commands::PrintDefaultConfig => {
            cli::print_default_config().await?;
        }
        Commands::ValidateConfig(args) => {
            cli::validate_config(args).await?;
        }
        Commands::McpStdio(args) => {
            cli::mcp_stdio_command(args).await?;
        }
    }

    Ok(())
}
