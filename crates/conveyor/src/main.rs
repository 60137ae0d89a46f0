//! Conveyor - command-line access to the automation platform API.
//!
//! Main entry point for the conveyor CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{call, config, tools};

/// Conveyor - call automation platform API tools from the command line
#[derive(Parser)]
#[command(name = "conveyor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Zone host, e.g. eu1.example.com
    #[arg(long, global = true)]
    pub zone: Option<String>,

    /// API token (overrides CONVEYOR_API_TOKEN and config)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Directory holding config.toml (overrides CONVEYOR_CONFIG_DIR)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect the available tools
    Tools(tools::ToolsArgs),

    /// Execute a tool against the API
    Call(call::CallArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "conveyor=debug,conveyor_client=debug,conveyor_tools=debug,conveyor_config=debug,info"
    } else {
        "conveyor=info,conveyor_client=info,conveyor_tools=info,warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();

    let ctx = commands::Context {
        json_output: cli.json,
        verbose: cli.verbose,
        zone: cli.zone,
        token: cli.token,
        config_dir: cli.config_dir,
    };

    match cli.command {
        Commands::Tools(args) => tools::run(args, &ctx).await,
        Commands::Call(args) => call::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
    }
}
