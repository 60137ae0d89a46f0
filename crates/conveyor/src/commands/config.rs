//! Config command - inspect client configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show resolved configuration and where it came from
    Show,

    /// Show configuration file paths
    Path,
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => cmd_show(ctx),
        ConfigCommand::Path => cmd_path(ctx),
    }
}

#[derive(Serialize)]
struct ShowOutput {
    sources: Vec<String>,
    zone: Option<String>,
    api_version: Option<u32>,
    protocol: String,
    token_source: Option<String>,
    headers: Vec<String>,
    retry: RetryOutput,
}

#[derive(Serialize)]
struct RetryOutput {
    max_retries: u32,
    base_delay_ms: u128,
    max_delay_ms: u128,
    backoff_multiplier: f64,
    retry_on_429: bool,
    retry_on_server_error: bool,
}

fn cmd_show(ctx: &Context) -> Result<()> {
    let loaded = ctx.settings()?;
    let settings = &loaded.settings;
    let token_source = ctx.token(&loaded).ok().map(|t| t.source.to_string());
    let policy = settings.retry.policy();

    let output = ShowOutput {
        sources: loaded
            .loaded_from()
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        zone: settings.zone.clone(),
        api_version: settings.api_version,
        protocol: settings.protocol()?.to_string(),
        token_source,
        headers: settings.headers.keys().cloned().collect(),
        retry: RetryOutput {
            max_retries: policy.max_retries,
            base_delay_ms: policy.base_delay.as_millis(),
            max_delay_ms: policy.max_delay.as_millis(),
            backoff_multiplier: policy.backoff_multiplier,
            retry_on_429: policy.retry_on_429,
            retry_on_server_error: policy.retry_on_server_error,
        },
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}\n", style("# Conveyor Configuration").bold());
    if output.sources.is_empty() {
        println!("No config files loaded (using defaults)\n");
    } else {
        println!("Config files:");
        for source in &output.sources {
            println!("  {}", source);
        }
        println!();
    }

    let unset = style("(not set)").dim().to_string();
    println!(
        "  Zone:         {}",
        output
            .zone
            .as_deref()
            .map_or(unset.clone(), |z| style(z).cyan().to_string())
    );
    println!(
        "  API version:  {}",
        output
            .api_version
            .map_or_else(
                || conveyor_client::DEFAULT_API_VERSION.to_string(),
                |v| v.to_string(),
            )
    );
    println!("  Protocol:     {}", output.protocol);
    match &output.token_source {
        Some(source) => println!("  Token:        {}", style(format!("from {}", source)).green()),
        None => println!("  Token:        {}", style("not found").red()),
    }
    if !output.headers.is_empty() {
        println!("  Headers:      {}", output.headers.join(", "));
    }
    println!(
        "  Retry:        max {} / 429 {} / 5xx {}",
        output.retry.max_retries, output.retry.retry_on_429, output.retry.retry_on_server_error
    );
    Ok(())
}

fn cmd_path(ctx: &Context) -> Result<()> {
    let user = match &ctx.config_dir {
        Some(dir) => Some(dir.join("config.toml")),
        None => conveyor_config::user_config_path(),
    };
    match user {
        Some(path) => println!("User config:    {}", path.display()),
        None => println!("User config:    (no config directory on this platform)"),
    }
    println!("Project config: ./conveyor.toml");
    Ok(())
}
