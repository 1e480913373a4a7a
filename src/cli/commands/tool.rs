//! Direct tool invocation and catalogue listing.

use crate::cli::Output;
use crate::config::Settings;
use crate::tools::{tool_definitions, ToolContext};
use anyhow::{Context, Result};
use serde_json::Value;

/// Invoke one tool function and print its tagged result as JSON.
pub async fn run_tool(name: &str, args: &str, settings: Settings) -> Result<()> {
    let args: Value = serde_json::from_str(args).context("--args must be a JSON object")?;
    if !args.is_object() {
        anyhow::bail!("--args must be a JSON object, got: {}", args);
    }

    let tools = ToolContext::from_settings(&settings)?;

    let spinner = Output::spinner(&format!("Calling {}...", name));
    let outcome = tools.call(name, &args).await;
    spinner.finish_and_clear();

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// List the tool catalogue.
pub fn run_tools() -> Result<()> {
    Output::header("Tool functions");
    println!();
    for def in tool_definitions() {
        Output::tool_entry(def.name, def.description);
    }
    Ok(())
}
