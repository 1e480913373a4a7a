//! Tool catalogue: names, descriptions and argument schemas.

use serde::Serialize;
use serde_json::{json, Value};

/// Declaration of one callable tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// All native tools, in catalogue order.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "get_weather",
            description: "Retrieves the current weather report for a specified city. \
                The city name must be in English.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "city": {"type": "string", "description": "City name in English"}
                },
                "required": ["city"]
            }),
        },
        ToolDefinition {
            name: "get_current_time",
            description: "Returns the current time in a specified time zone identifier, \
                e.g. \"America/New_York\" or \"Asia/Taipei\".",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "tz_identifier": {"type": "string", "description": "IANA time zone identifier"}
                },
                "required": ["tz_identifier"]
            }),
        },
        ToolDefinition {
            name: "get_ncu_calendar",
            description: "Returns the NCU (中央大學) academic calendar 行事曆.",
            input_schema: json!({"type": "object", "properties": {}}),
        },
        ToolDefinition {
            name: "get_travel_equipment",
            description: "根據天氣狀況，回傳旅遊必備的裝備建議清單。\
                weather_status 例如 \"Clear\", \"Rain\", \"Clouds\"，通常來自 get_weather。",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "weather_status": {"type": "string", "description": "Weather condition"}
                },
                "required": ["weather_status"]
            }),
        },
        ToolDefinition {
            name: "get_exchange_rates",
            description: "查詢最新的匯率。base 為基準貨幣 (預設 EUR)，symbols 為可選的目標貨幣代碼，以逗號分隔。",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "base": {"type": "string", "description": "Base currency", "default": "EUR"},
                    "symbols": {"type": "string", "description": "Comma-separated target currencies"}
                }
            }),
        },
        ToolDefinition {
            name: "convert_currency",
            description: "進行貨幣換算 (例如: 將 100 USD 換算成 TWD)。",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "amount": {"type": "number", "description": "Amount to convert"},
                    "from_curr": {"type": "string", "description": "Source currency code"},
                    "to_curr": {"type": "string", "description": "Target currency code"}
                },
                "required": ["amount", "from_curr", "to_curr"]
            }),
        },
        ToolDefinition {
            name: "get_translate",
            description: "旅遊翻譯小幫手。可以將文字翻譯成指定語言 (en, ja, ko, th, fr ...)。",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {"type": "string", "description": "Sentence to translate"},
                    "target_lang": {"type": "string", "description": "Target language code"}
                },
                "required": ["text", "target_lang"]
            }),
        },
    ]
}

/// Look up a definition by name.
pub fn find_definition(name: &str) -> Option<ToolDefinition> {
    tool_definitions().into_iter().find(|t| t.name == name)
}
