//! # roster CLI
//!
//! Command-line interface for Roster - an employee-directory lookup agent.
//!
//! ## Usage
//!
//! - `roster` - Run the default directory query
//! - `roster "question about an employee"` - Run a single query
//! - `roster tools` - Show available tools
//! - `roster tasks` - Show the builtin task definitions

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{run_command, tasks_command, tools_command};
use config::ConfigLoader;

/// The query used when none is given on the command line
const DEFAULT_QUERY: &str = "who is the supervisor of the employee named David?";

/// roster - an employee-directory lookup agent
#[derive(Parser)]
#[command(name = "roster")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ask an LLM-backed agent questions about the employee directory")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Protocol to use (openai, azure_openai)
    #[arg(long)]
    protocol: Option<String>,

    /// API key override
    #[arg(long)]
    api_key: Option<String>,

    /// Endpoint URL override
    #[arg(long)]
    endpoint: Option<String>,

    /// API version override (Azure OpenAI)
    #[arg(long)]
    api_version: Option<String>,

    /// Model or deployment name override
    #[arg(long)]
    model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Maximum number of agent steps
    #[arg(long)]
    max_steps: Option<usize>,

    /// Seed for the directory's random source (deterministic lookups)
    #[arg(long)]
    seed: Option<u64>,

    /// Save the run transcript to this file
    #[arg(long)]
    transcript_file: Option<PathBuf>,

    /// The query to run (defaults to the supervisor question)
    query: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show available tools
    Tools,

    /// Show the builtin task definitions
    Tasks,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> ConfigLoader {
    let mut loader = ConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(protocol) = &cli.protocol {
        loader = loader.with_protocol_override(protocol.clone());
    }

    if let Some(api_key) = &cli.api_key {
        loader = loader.with_api_key_override(api_key.clone());
    }

    if let Some(endpoint) = &cli.endpoint {
        loader = loader.with_endpoint_override(endpoint.clone());
    }

    if let Some(api_version) = &cli.api_version {
        loader = loader.with_api_version_override(api_version.clone());
    }

    if let Some(model) = &cli.model {
        loader = loader.with_model_override(model.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    roster_core::init_tracing_with_debug(cli.verbose);

    let config_loader = build_config_loader(&cli);

    match (cli.query, cli.command) {
        (Some(_), Some(_)) => {
            tracing::error!("Cannot specify both a query and a subcommand");
            std::process::exit(1);
        }
        (None, Some(Commands::Tools)) => tools_command(),
        (None, Some(Commands::Tasks)) => tasks_command(),
        (query, None) => {
            let query = query.unwrap_or_else(|| DEFAULT_QUERY.to_string());
            run_command(
                query,
                config_loader,
                cli.max_steps,
                cli.seed,
                cli.transcript_file,
            )
            .await
        }
    }
}
