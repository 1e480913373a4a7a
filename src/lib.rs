//! Tripmate - chat relay and tool belt for a travel-planning agent
//!
//! The agent itself (model, planning loop, tool dispatch) runs in an external
//! agent runtime. This crate supplies everything around it:
//!
//! - `tools` - weather, time, calendar, equipment, currency and translation functions
//! - `agent` - declarative agent configurations and their tool sources
//! - `mcp` - stdio tool servers that expose local tools to the runtime
//! - `render` - turns a runtime reply (a list of conversation turns) into HTML
//! - `relay` - the web front end: chat page plus `POST /call_llm`
//! - `config` - settings and agent instructions
//!
//! # Example
//!
//! ```rust,no_run
//! use serde_json::json;
//! use tripmate::render::render_value;
//!
//! let reply = json!([
//!     {"content": {"role": "model", "parts": [{"text": "**Hello**"}]}}
//! ]);
//! let html = render_value(&reply).unwrap_or_default();
//! assert!(html.contains("<strong>Hello</strong>"));
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod relay;
pub mod render;
pub mod tools;

pub use error::{Result, TripmateError};
