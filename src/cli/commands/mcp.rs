//! MCP command implementation.

use crate::config::Settings;
use crate::mcp::{McpServer, ToolServerKind};
use crate::tools::ToolContext;
use anyhow::Result;

/// Run a tool server over stdio.
pub async fn run_mcp(kind: ToolServerKind, settings: Settings) -> Result<()> {
    let tools = ToolContext::from_settings(&settings)?;
    McpServer::new(kind, tools).run().await
}
