//! Agent configuration.
//!
//! Declares what the external agent runtime needs to run an agent: identity,
//! model, instruction and the tools it may call. Native tool functions are
//! referenced by name; tool servers by a launch command or an event-stream URL.
//! Nothing here drives the reasoning loop itself.

mod config;
mod presets;

pub use config::{AgentConfig, ConnectionParams, ToolReference};
pub use presets::AgentPreset;
