//! Call command - execute one tool.

use anyhow::{Context as _, Result};
use clap::Args;
use conveyor_tools::{ToolOutput, ToolRegistry};
use serde_json::Value;

use super::Context;

/// Arguments for the call command.
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Tool name, e.g. scenarios_get
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(long, default_value = "{}")]
    pub args: String,
}

/// Run the call command.
pub async fn run(args: CallArgs, ctx: &Context) -> Result<()> {
    let registry = ToolRegistry::builtin()?;
    if !registry.contains(&args.tool) {
        anyhow::bail!(
            "tool '{}' not found. Run `conveyor tools list` to see available tools",
            args.tool
        );
    }
    let input = parse_args(&args.args)?;
    let client = ctx.client()?;

    let output = registry.execute(&args.tool, &client, input).await?;
    print_output(&output, ctx)
}

fn parse_args(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw).context("--args must be valid JSON")?;
    if !value.is_object() {
        anyhow::bail!("--args must be a JSON object");
    }
    Ok(value)
}

fn print_output(output: &ToolOutput, ctx: &Context) -> Result<()> {
    match output {
        ToolOutput::Text(text) if ctx.json_output => {
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({"message": text}))?)
        }
        ToolOutput::Text(text) => println!("{}", text),
        ToolOutput::Json(value) => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_object() {
        let value = parse_args(r#"{"scenarioId": 5}"#).unwrap();
        assert_eq!(value["scenarioId"], 5);
    }

    #[test]
    fn test_parse_args_rejects_non_object() {
        assert!(parse_args("[1, 2]").is_err());
        assert!(parse_args("not json").is_err());
    }
}
