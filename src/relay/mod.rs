//! Front-end chat relay.
//!
//! Serves the chat page, keeps one conversation id per browser in a cookie,
//! forwards each user message to the agent runtime and answers with the
//! rendered reply. Runtime failures turn into a fixed inline error fragment.

mod client;
mod page;
mod server;

pub use client::{AgentRuntime, HttpAgentRuntime, NewMessage, RunRequest, TextPart};
pub use page::INDEX_HTML;
pub use server::{new_session_id, router, RelayState, RELAY_ERROR_HTML, SESSION_COOKIE};
