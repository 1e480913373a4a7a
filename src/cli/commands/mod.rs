//! CLI command implementations.

mod agent;
mod config;
mod doctor;
mod mcp;
mod render;
mod serve;
mod tool;

pub use agent::run_agent;
pub use config::run_config;
pub use doctor::run_doctor;
pub use mcp::run_mcp;
pub use render::run_render;
pub use serve::run_serve;
pub use tool::{run_tool, run_tools};
