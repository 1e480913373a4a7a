//! Built-in agent presets.

use super::config::{AgentConfig, ConnectionParams, ToolReference};
use crate::config::{Instructions, Settings, BRAVE_API_KEY_ENV};
use crate::error::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

const FILESYSTEM_SERVER: &str = "@modelcontextprotocol/server-filesystem";
const BRAVE_SEARCH_SERVER: &str = "@modelcontextprotocol/server-brave-search";

/// Which agent bundle to build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AgentPreset {
    /// Time, weather and campus calendar questions.
    #[value(alias = "weather")]
    WeatherTime,
    /// Travel itinerary planning with search and equipment advice.
    #[default]
    #[value(alias = "travel")]
    TravelPlanner,
}

/// Parses `agent.preset` from the config file with the same names the CLI accepts.
impl std::str::FromStr for AgentPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(&s.replace('_', "-"), true)
            .map_err(|_| format!("Unknown agent preset: {}", s))
    }
}

impl std::fmt::Display for AgentPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_possible_value() {
            Some(value) => write!(f, "{}", value.get_name()),
            None => Ok(()),
        }
    }
}

/// Launch data for this binary's equipment tool server.
fn equipment_connection(settings: &Settings) -> ConnectionParams {
    match settings.agent.equipment_command.split_first() {
        Some((command, args)) => ConnectionParams::stdio(command, args.iter().cloned()),
        None => {
            let exe = std::env::current_exe()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "tripmate".to_string());
            ConnectionParams::stdio(&exe, ["mcp", "equipment"])
        }
    }
}

fn filesystem_connection(settings: &Settings) -> ConnectionParams {
    ConnectionParams::stdio(
        "npx",
        [
            "-y".to_string(),
            FILESYSTEM_SERVER.to_string(),
            settings.filesystem_root().display().to_string(),
        ],
    )
}

fn brave_search_connection(settings: &Settings) -> ConnectionParams {
    let api_key = match settings.search.api_key.as_deref() {
        Some(key) => key.to_string(),
        None => {
            warn!("{} not found in environment or config; search will fail", BRAVE_API_KEY_ENV);
            String::new()
        }
    };

    ConnectionParams::stdio("npx", ["-y", BRAVE_SEARCH_SERVER]).with_env(BRAVE_API_KEY_ENV, &api_key)
}

impl AgentConfig {
    /// Build a preset from settings and instruction templates.
    pub fn from_preset(
        preset: AgentPreset,
        settings: &Settings,
        instructions: &Instructions,
    ) -> Result<Self> {
        let mut vars = HashMap::new();
        vars.insert(
            "filesystem_root".to_string(),
            settings.filesystem_root().display().to_string(),
        );

        let config = match preset {
            AgentPreset::WeatherTime => AgentConfig {
                name: "weather_time_agent".to_string(),
                model: settings.agent.model.clone(),
                description: instructions.weather_time.description.clone(),
                instruction: instructions
                    .render_with_custom(&instructions.weather_time.instruction, &vars),
                tools: vec![
                    ToolReference::function("get_weather")?,
                    ToolReference::function("get_current_time")?,
                    ToolReference::function("get_ncu_calendar")?,
                    ToolReference::toolset(filesystem_connection(settings)),
                    ToolReference::toolset(equipment_connection(settings)),
                    ToolReference::toolset(ConnectionParams::sse(&settings.agent.coingecko_url)?),
                    ToolReference::toolset(ConnectionParams::sse(&settings.agent.luck_server_url)?),
                ],
            },
            AgentPreset::TravelPlanner => AgentConfig {
                name: "travel_planner_agent".to_string(),
                model: settings.agent.model.clone(),
                description: instructions.travel_planner.description.clone(),
                instruction: instructions
                    .render_with_custom(&instructions.travel_planner.instruction, &vars),
                tools: vec![
                    ToolReference::function("get_weather")?,
                    ToolReference::function("get_current_time")?,
                    ToolReference::toolset(filesystem_connection(settings)),
                    ToolReference::toolset(brave_search_connection(settings)),
                    ToolReference::toolset(equipment_connection(settings)),
                    ToolReference::toolset(ConnectionParams::sse(&settings.agent.luck_server_url)?),
                ],
            },
        };

        config.validate()?;
        Ok(config)
    }
}
