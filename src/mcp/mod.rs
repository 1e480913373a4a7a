//! MCP (Model Context Protocol) tool servers.
//!
//! Exposes local tool functions to the agent runtime as a sub-process.
//! Implements JSON-RPC 2.0 over stdio, one message per line.

mod catalog;
mod protocol;
mod server;

pub use catalog::ToolServerKind;
pub use server::McpServer;
