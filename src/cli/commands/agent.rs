//! Agent configuration command.

use crate::agent::{AgentConfig, AgentPreset};
use crate::config::{Instructions, Settings};
use anyhow::Result;

/// Print the agent configuration as JSON.
pub fn run_agent(preset: Option<AgentPreset>, settings: &Settings) -> Result<()> {
    let preset = match preset {
        Some(preset) => preset,
        None => settings.agent.preset.parse().map_err(|e: String| anyhow::anyhow!(e))?,
    };

    let instructions = Instructions::load(
        settings.agent.instructions_dir.as_deref(),
        Some(&settings.agent.variables),
    )?;
    let config = AgentConfig::from_preset(preset, settings, &instructions)?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
