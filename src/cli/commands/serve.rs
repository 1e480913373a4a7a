//! Chat relay web server.

use crate::cli::Output;
use crate::config::Settings;
use crate::relay::{router, HttpAgentRuntime, RelayState};
use std::sync::Arc;

/// Run the chat relay.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let runtime = HttpAgentRuntime::new(&settings.relay)?;
    let state = Arc::new(RelayState::new(Arc::new(runtime)));
    let app = router(state);

    let host = host.unwrap_or_else(|| settings.relay.host.clone());
    let port = port.unwrap_or(settings.relay.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Tripmate Chat Relay");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    Output::kv("Agent runtime", &settings.relay.agent_server_url);
    Output::kv("App", &settings.relay.app_name);
    Output::kv("Chat page", "GET  /");
    Output::kv("Send message", "POST /call_llm");
    Output::kv("Health", "GET  /health");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}
