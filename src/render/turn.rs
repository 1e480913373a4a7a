//! Conversation turns as emitted by the agent runtime.
//!
//! The runtime's JSON is loosely typed: a part is discriminated by which of
//! `functionCall`, `functionResponse` or `text` is present. Parsing resolves
//! that once into [`Part`] and never fails; anything unrecognizable becomes
//! [`Part::Empty`].

use serde_json::{Map, Value};

/// One emitted unit of a reply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversationTurn {
    /// Author reported by the runtime (agent name), if any.
    pub author: Option<String>,
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

/// A single element of a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    FunctionCall(FunctionCall),
    FunctionResponse(FunctionResponse),
    Text(String),
    /// None of the known variants was present.
    Empty,
}

/// The agent invoking a named tool.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: Option<String>,
    /// Arguments in the order the runtime emitted them.
    pub args: Map<String, Value>,
}

/// A tool's result. The payload shape varies by tool server.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResponse {
    pub name: Option<String>,
    pub response: Value,
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

impl From<&Value> for Part {
    fn from(value: &Value) -> Self {
        if let Some(call) = value.get("functionCall") {
            return Part::FunctionCall(FunctionCall {
                name: string_field(call, "name"),
                args: call
                    .get("args")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default(),
            });
        }

        if let Some(response) = value.get("functionResponse") {
            return Part::FunctionResponse(FunctionResponse {
                name: string_field(response, "name"),
                response: response.get("response").cloned().unwrap_or(Value::Null),
            });
        }

        match value.get("text") {
            Some(Value::String(text)) => Part::Text(text.clone()),
            _ => Part::Empty,
        }
    }
}

impl From<&Value> for ConversationTurn {
    fn from(value: &Value) -> Self {
        let content = value.get("content").unwrap_or(&Value::Null);
        ConversationTurn {
            author: string_field(value, "author"),
            role: string_field(content, "role"),
            parts: content
                .get("parts")
                .and_then(Value::as_array)
                .map(|parts| parts.iter().map(Part::from).collect())
                .unwrap_or_default(),
        }
    }
}

/// Parse a runtime reply. Returns `None` only when the reply is not a JSON array.
pub fn parse_turns(value: &Value) -> Option<Vec<ConversationTurn>> {
    value
        .as_array()
        .map(|items| items.iter().map(ConversationTurn::from).collect())
}
