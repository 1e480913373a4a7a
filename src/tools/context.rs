//! Typed tool calls and their dispatch.

use super::{
    get_current_time, get_ncu_calendar, get_travel_equipment, CurrencyClient, ToolOutcome,
    Translator, WeatherClient,
};
use crate::config::Settings;
use crate::error::{Result, TripmateError};
use serde_json::Value;
use tracing::info;

/// A tool invocation with its arguments resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    GetWeather { city: String },
    GetCurrentTime { tz_identifier: String },
    GetNcuCalendar,
    GetTravelEquipment { weather_status: String },
    GetExchangeRates { base: String, symbols: Option<String> },
    ConvertCurrency { amount: f64, from_curr: String, to_curr: String },
    GetTranslate { text: String, target_lang: String },
}

impl ToolCall {
    /// Tool name as exposed to the agent.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::GetWeather { .. } => "get_weather",
            ToolCall::GetCurrentTime { .. } => "get_current_time",
            ToolCall::GetNcuCalendar => "get_ncu_calendar",
            ToolCall::GetTravelEquipment { .. } => "get_travel_equipment",
            ToolCall::GetExchangeRates { .. } => "get_exchange_rates",
            ToolCall::ConvertCurrency { .. } => "convert_currency",
            ToolCall::GetTranslate { .. } => "get_translate",
        }
    }
}

fn required_str(args: &Value, key: &str) -> Result<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| TripmateError::InvalidInput(format!("Missing '{}' argument", key)))
}

fn optional_str(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Accepts a JSON number or a numeric string.
fn required_f64(args: &Value, key: &str) -> Result<f64> {
    match args.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| TripmateError::InvalidInput(format!("Missing '{}' argument", key)))
}

/// Parse a tool call from its name and JSON argument mapping.
pub fn parse_tool_call(name: &str, args: &Value) -> Result<ToolCall> {
    match name {
        "get_weather" => Ok(ToolCall::GetWeather {
            city: required_str(args, "city")?,
        }),
        "get_current_time" => Ok(ToolCall::GetCurrentTime {
            tz_identifier: required_str(args, "tz_identifier")?,
        }),
        "get_ncu_calendar" => Ok(ToolCall::GetNcuCalendar),
        "get_travel_equipment" => Ok(ToolCall::GetTravelEquipment {
            weather_status: required_str(args, "weather_status")?,
        }),
        "get_exchange_rates" => Ok(ToolCall::GetExchangeRates {
            base: optional_str(args, "base").unwrap_or_else(|| "EUR".to_string()),
            symbols: optional_str(args, "symbols"),
        }),
        "convert_currency" => Ok(ToolCall::ConvertCurrency {
            amount: required_f64(args, "amount")?,
            from_curr: required_str(args, "from_curr")?,
            to_curr: required_str(args, "to_curr")?,
        }),
        "get_translate" => Ok(ToolCall::GetTranslate {
            text: required_str(args, "text")?,
            target_lang: required_str(args, "target_lang")?,
        }),
        _ => Err(TripmateError::UnknownTool(name.to_string())),
    }
}

/// Tool execution context holding the upstream API clients.
pub struct ToolContext {
    weather: WeatherClient,
    currency: CurrencyClient,
    translator: Translator,
}

impl ToolContext {
    pub fn new(weather: WeatherClient, currency: CurrencyClient, translator: Translator) -> Self {
        Self {
            weather,
            currency,
            translator,
        }
    }

    /// Build every client from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            WeatherClient::new(&settings.weather)?,
            CurrencyClient::new(&settings.currency)?,
            Translator::new(&settings.translate)?,
        ))
    }

    /// Execute a parsed tool call.
    pub async fn execute(&self, tool: &ToolCall) -> ToolOutcome {
        match tool {
            ToolCall::GetWeather { city } => self.weather.get_weather(city).await,
            ToolCall::GetCurrentTime { tz_identifier } => get_current_time(tz_identifier),
            ToolCall::GetNcuCalendar => get_ncu_calendar(),
            ToolCall::GetTravelEquipment { weather_status } => get_travel_equipment(weather_status),
            ToolCall::GetExchangeRates { base, symbols } => {
                self.currency
                    .get_exchange_rates(base, symbols.as_deref())
                    .await
            }
            ToolCall::ConvertCurrency {
                amount,
                from_curr,
                to_curr,
            } => {
                self.currency
                    .convert_currency(*amount, from_curr, to_curr)
                    .await
            }
            ToolCall::GetTranslate { text, target_lang } => {
                self.translator.get_translate(text, target_lang).await
            }
        }
    }

    /// Parse and execute by name. Parse failures become error outcomes.
    pub async fn call(&self, name: &str, args: &Value) -> ToolOutcome {
        info!("Calling tool: {} with args: {}", name, args);

        match parse_tool_call(name, args) {
            Ok(tool) => self.execute(&tool).await,
            Err(e) => ToolOutcome::error(format!("Failed to parse tool call: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_weather() {
        let tool = parse_tool_call("get_weather", &json!({"city": "Taipei"})).unwrap();
        assert_eq!(
            tool,
            ToolCall::GetWeather {
                city: "Taipei".to_string()
            }
        );
        assert_eq!(tool.name(), "get_weather");
    }

    #[test]
    fn test_parse_exchange_rates_defaults_to_eur() {
        let tool = parse_tool_call("get_exchange_rates", &json!({})).unwrap();
        assert_eq!(
            tool,
            ToolCall::GetExchangeRates {
                base: "EUR".to_string(),
                symbols: None
            }
        );
    }

    #[test]
    fn test_parse_amount_from_string() {
        let tool = parse_tool_call(
            "convert_currency",
            &json!({"amount": "12.5", "from_curr": "USD", "to_curr": "JPY"}),
        )
        .unwrap();
        match tool {
            ToolCall::ConvertCurrency { amount, .. } => assert_eq!(amount, 12.5),
            other => panic!("Expected ConvertCurrency, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_argument() {
        let err = parse_tool_call("get_translate", &json!({"text": "hi"})).unwrap_err();
        assert!(err.to_string().contains("target_lang"));
    }

    #[test]
    fn test_unknown_tool() {
        assert!(matches!(
            parse_tool_call("launch_rocket", &json!({})),
            Err(TripmateError::UnknownTool(_))
        ));
    }

    #[tokio::test]
    async fn test_call_local_tools() {
        let ctx = ToolContext::from_settings(&Settings::default()).unwrap();

        let outcome = ctx
            .call("get_travel_equipment", &json!({"weather_status": "Snow"}))
            .await;
        assert!(outcome.text().contains("暖暖包"));

        let outcome = ctx.call("get_ncu_calendar", &json!({})).await;
        assert_eq!(outcome, ToolOutcome::success("calendar", "9/29, 10/6 不上課"));
    }

    #[test]
    fn test_call_unknown_is_error_outcome() {
        let ctx = ToolContext::from_settings(&Settings::default()).unwrap();
        let outcome = tokio_test::block_on(ctx.call("nope", &json!({})));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap()["error_message"],
            "Failed to parse tool call: Unknown tool: nope"
        );
    }
}
