//! MCP server implementation.

use super::catalog::ToolServerKind;
use super::protocol::*;
use crate::tools::ToolContext;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool server speaking line-delimited JSON-RPC.
pub struct McpServer {
    kind: ToolServerKind,
    tools: ToolContext,
}

impl McpServer {
    pub fn new(kind: ToolServerKind, tools: ToolContext) -> Self {
        Self { kind, tools }
    }

    /// Run over the process's stdin/stdout.
    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve requests from `reader` until EOF, writing responses to `writer`.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("{} tool server starting", self.kind);
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(line) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => {
                    warn!("Failed to parse request: {}", e);
                    Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"))
                }
            };

            if let Some(response) = response {
                let mut out = serde_json::to_vec(&response)?;
                out.push(b'\n');
                writer.write_all(&out).await?;
                writer.flush().await?;
            }
        }

        info!("{} tool server stopped", self.kind);
        Ok(())
    }

    /// Handle a single JSON-RPC message. Notifications get no response.
    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("MCP request: {}", request.method);

        if request.is_notification() {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION,
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: self.kind.server_name().to_string(),
                version: SERVER_VERSION,
            },
        };

        to_response(id, &result)
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: self.kind.definitions(),
        };
        to_response(id, &result)
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, &format!("Invalid params: {}", e))
            }
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let result = if self.kind.exposes(&params.name) {
            let args = params.arguments.unwrap_or_else(|| json!({}));
            ToolCallResult::from(self.tools.call(&params.name, &args).await)
        } else {
            ToolCallResult::error(format!("Unknown tool: {}", params.name))
        };

        to_response(id, &result)
    }
}

fn to_response<T: serde::Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, -32603, &format!("Internal error: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    async fn exchange(kind: ToolServerKind, input: &str) -> Vec<Value> {
        let server = McpServer::new(kind, ToolContext::from_settings(&Settings::default()).unwrap());
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_initialize_and_list() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"t","version":"0"}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n"
        );

        let responses = exchange(ToolServerKind::Equipment, input).await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["result"]["serverInfo"]["name"], "travel_equipment");
        assert_eq!(responses[1]["id"], 2);
        assert_eq!(
            responses[1]["result"]["tools"][0]["name"],
            "get_travel_equipment"
        );
    }

    #[tokio::test]
    async fn test_tools_call() {
        let input = r#"{"jsonrpc":"2.0","id":"a","method":"tools/call","params":{"name":"get_travel_equipment","arguments":{"weather_status":"light rain"}}}"#;
        let responses = exchange(ToolServerKind::Equipment, input).await;

        let text = responses[0]["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("輕便雨衣"));
        assert!(responses[0]["result"].get("isError").is_none());
    }

    #[tokio::test]
    async fn test_tool_not_on_this_server() {
        let input = r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get_travel_equipment","arguments":{}}}"#;
        let responses = exchange(ToolServerKind::Currency, input).await;
        assert_eq!(responses[0]["result"]["isError"], true);
    }

    #[tokio::test]
    async fn test_missing_arguments_is_tool_error() {
        let input = r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"get_travel_equipment"}}"#;
        let responses = exchange(ToolServerKind::Equipment, input).await;
        assert_eq!(responses[0]["result"]["isError"], true);
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let input = "not json\n{\"jsonrpc\":\"2.0\",\"id\":5,\"method\":\"resources/list\"}\n";
        let responses = exchange(ToolServerKind::Equipment, input).await;
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[1]["error"]["code"], METHOD_NOT_FOUND);
    }
}
