//! CLI module for Tripmate.

pub mod commands;
mod output;

pub use output::Output;

use crate::agent::AgentPreset;
use crate::mcp::ToolServerKind;
use clap::{Parser, Subcommand};

/// Tripmate - chat relay and tool belt for a travel-planning agent
///
/// Serves a browser chat that talks to an external agent runtime, and provides
/// the weather, time, currency, translation and equipment tools that agent uses.
#[derive(Parser, Debug)]
#[command(name = "tripmate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the chat relay web server
    Serve {
        /// Host to bind to (defaults to relay.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to relay.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run a tool server over stdio for the agent runtime
    Mcp {
        /// Which tool set to expose
        #[arg(value_enum)]
        server: ToolServerKind,
    },

    /// Invoke one tool function and print its JSON result
    Tool {
        /// Tool name (see `tripmate tools`)
        name: String,

        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// List available tool functions
    Tools,

    /// Print the agent configuration handed to the runtime
    Agent {
        /// Preset to build (defaults to agent.preset)
        #[arg(short, long, value_enum)]
        preset: Option<AgentPreset>,
    },

    /// Render a saved agent runtime reply (JSON) as HTML
    Render {
        /// Reply file (stdin if not specified)
        input: Option<String>,
    },

    /// Check API keys and agent runtime reachability
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,
}
