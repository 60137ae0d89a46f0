//! Tools command - inspect the tool registry.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use console::style;
use conveyor_tools::{ToolDefinition, ToolRegistry};

use super::Context;

/// Arguments for the tools command.
#[derive(Args, Debug)]
pub struct ToolsArgs {
    #[command(subcommand)]
    pub command: ToolsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ToolsCommand {
    /// List available tools
    List {
        /// Only show tools in this category (e.g. scenarios)
        #[arg(long)]
        category: Option<String>,
    },

    /// Show a tool's description and input schema
    Describe {
        /// Tool name, e.g. scenarios_list
        name: String,
    },
}

/// Run the tools command.
pub async fn run(args: ToolsArgs, ctx: &Context) -> Result<()> {
    let registry = ToolRegistry::builtin()?;
    match args.command {
        ToolsCommand::List { category } => cmd_list(&registry, category.as_deref(), ctx),
        ToolsCommand::Describe { name } => cmd_describe(&registry, &name, ctx),
    }
}

fn cmd_list(registry: &ToolRegistry, category: Option<&str>, ctx: &Context) -> Result<()> {
    let definitions: Vec<ToolDefinition> = match category {
        Some(category) => {
            let tools = registry.by_category(category);
            if tools.is_empty() {
                bail!(
                    "unknown category '{}'. Available: {}",
                    category,
                    registry.categories().join(", ")
                );
            }
            tools.into_iter().map(|t| t.definition()).collect()
        }
        None => registry.definitions(),
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    let mut current = "";
    for def in &definitions {
        if def.category != current {
            if !current.is_empty() {
                println!();
            }
            println!("{}", style(def.category).bold());
            current = def.category;
        }
        let marker = if def.annotations.destructive {
            style("!").red().to_string()
        } else {
            " ".to_string()
        };
        if ctx.verbose {
            println!(
                "  {} {:<36} {} [{}]",
                marker,
                style(def.name).cyan(),
                def.title,
                def.scope.unwrap_or("-")
            );
        } else {
            println!("  {} {:<36} {}", marker, style(def.name).cyan(), def.title);
        }
    }
    Ok(())
}

fn cmd_describe(registry: &ToolRegistry, name: &str, ctx: &Context) -> Result<()> {
    let Some(tool) = registry.get(name) else {
        bail!("tool '{}' not found. Run `conveyor tools list` to see available tools", name);
    };
    let def = tool.definition();

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&def)?);
        return Ok(());
    }

    println!("{} - {}", style(def.name).bold(), def.title);
    println!("{}\n", def.description);
    println!("  Category:     {}", style(def.category).cyan());
    if let Some(scope) = def.scope {
        println!("  Scope:        {}", style(scope).cyan());
    }
    let hints = [
        (def.annotations.read_only, "read-only"),
        (def.annotations.idempotent, "idempotent"),
        (def.annotations.destructive, "destructive"),
    ];
    let hints: Vec<&str> = hints.iter().filter(|(on, _)| *on).map(|(_, h)| *h).collect();
    if !hints.is_empty() {
        println!("  Annotations:  {}", hints.join(", "));
    }
    println!("\nInput schema:");
    println!("{}", serde_json::to_string_pretty(&def.input_schema)?);
    Ok(())
}
