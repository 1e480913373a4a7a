//! HTML fragments for each part variant.

use super::extract::extract_result_text;
use super::turn::{FunctionCall, FunctionResponse};
use pulldown_cmark::{html, Options, Parser};
use pulldown_cmark_escape as escape;
use serde_json::Value;

/// Label used when a function call carries no name.
pub const UNKNOWN_TOOL: &str = "Unknown Tool";

const TOOL_CALL_STYLE: &str =
    "background-color: #f0f0f0; padding: 8px; border-radius: 5px; margin: 5px 0; color: #555; font-size: 0.9em;";
const TOOL_RESULT_STYLE: &str =
    "background-color: #e8f5e9; padding: 8px; border-radius: 5px; margin: 5px 0; color: #2e7d32; font-size: 0.9em;";

/// Escape text for inclusion in HTML content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    escape::escape_html(&mut out, text)
        .map(|()| out)
        .unwrap_or_default()
}

/// Escape, keeping line breaks visible.
fn escape_multiline(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

fn arg_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Convert Markdown to HTML. Upstream text is trusted; raw HTML passes through.
pub fn markdown_to_html(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// `🔧 tool name` plus `key: value` arguments joined by ", ".
pub fn tool_call_fragment(call: &FunctionCall) -> String {
    let name = call.name.as_deref().unwrap_or(UNKNOWN_TOOL);
    let args = call
        .args
        .iter()
        .map(|(key, value)| {
            format!(
                "<b>{}</b>: {}",
                escape_html(key),
                escape_html(&arg_value(value))
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "<div class='tool-call' style='{}'>🔧 <b>正在呼叫工具：</b> {}<br><span style='margin-left: 20px;'>參數：{}</span></div>",
        TOOL_CALL_STYLE,
        escape_html(name),
        args
    )
}

/// `✅` plus the text extracted from the tool's payload.
pub fn tool_result_fragment(response: &FunctionResponse) -> String {
    format!(
        "<div class='tool-result' style='{}'>✅ <b>工具回傳：</b> {}</div>",
        TOOL_RESULT_STYLE,
        escape_multiline(&extract_result_text(&response.response))
    )
}

/// Markdown-converted text wrapped as a message.
pub fn text_fragment(text: &str) -> String {
    format!("<div class='message-text'>{}</div>", markdown_to_html(text))
}
