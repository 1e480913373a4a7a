//! Rendering of agent replies into HTML.
//!
//! A reply is an ordered list of [`ConversationTurn`]s. Every part of every
//! turn yields at most one fragment, in encounter order, and the fragments
//! are concatenated without separators:
//!
//! - function call → `tool-call` fragment with the tool name and `key: value` arguments
//! - function response → `tool-result` fragment with text picked by [`extract_result_text`]
//! - text → `message-text` fragment holding the Markdown rendered as HTML
//! - anything else → nothing
//!
//! Rendering is a pure function of its input.

pub mod extract;
mod html;
mod turn;

pub use extract::{extract_result_text, FALLBACK_RESULT};
pub use html::{
    escape_html, markdown_to_html, text_fragment, tool_call_fragment, tool_result_fragment,
    UNKNOWN_TOOL,
};
pub use turn::{parse_turns, ConversationTurn, FunctionCall, FunctionResponse, Part};

use serde_json::Value;

/// Render one part; `None` for parts with no known variant.
pub fn render_part(part: &Part) -> Option<String> {
    match part {
        Part::FunctionCall(call) => Some(tool_call_fragment(call)),
        Part::FunctionResponse(response) => Some(tool_result_fragment(response)),
        Part::Text(text) => Some(text_fragment(text)),
        Part::Empty => None,
    }
}

/// Render a sequence of turns.
pub fn render(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .flat_map(|turn| turn.parts.iter())
        .filter_map(render_part)
        .collect()
}

/// Parse and render a raw runtime reply. `None` if the reply is not a JSON array.
pub fn render_value(reply: &Value) -> Option<String> {
    parse_turns(reply).map(|turns| render(&turns))
}
