//! Display text extraction from tool-result payloads.
//!
//! Tool servers do not agree on a result shape, so extraction tries a fixed,
//! ordered list of extractors and takes the first hit.

use serde_json::Value;
use tracing::debug;

/// Shown when no extractor matches.
pub const FALLBACK_RESULT: &str = "tool execution completed";

/// Returns the display string for a payload, if this extractor's shape matches.
pub type Extractor = fn(&Value) -> Option<String>;

/// Extractors in priority order, labelled by the shape they read.
pub const EXTRACTORS: &[(&str, Extractor)] = &[
    ("report", report),
    ("result.content", result_content),
    ("content", content),
];

/// Scalars are shown without JSON quoting; structures as compact JSON.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `{"report": ...}` from native tool functions.
pub fn report(response: &Value) -> Option<String> {
    response.get("report").map(display)
}

/// `{"result": {"content": [{"text": ...}]}}` from tool servers wrapped by the runtime.
pub fn result_content(response: &Value) -> Option<String> {
    response.get("result").and_then(first_content_text)
}

/// `{"content": [{"text": ...}]}` from tool servers answering directly.
pub fn content(response: &Value) -> Option<String> {
    first_content_text(response)
}

fn first_content_text(value: &Value) -> Option<String> {
    value
        .get("content")?
        .as_array()?
        .first()?
        .get("text")
        .map(display)
}

/// Run the extractors in order and fall back to [`FALLBACK_RESULT`].
pub fn extract_result_text(response: &Value) -> String {
    for (label, extractor) in EXTRACTORS {
        if let Some(text) = extractor(response) {
            debug!("Tool result text read from `{}`", label);
            return text;
        }
    }
    debug!("No tool result text found, using fallback");
    FALLBACK_RESULT.to_string()
}
