//! Tool functions callable by the agent.
//!
//! Every tool performs at most one outbound call (or a local lookup) and
//! reports its result as a [`ToolOutcome`]. Failures are data, never `Err`:
//! a missing API key, a transport error or an unexpected payload all become
//! `{"status": "error", "error_message": ...}`.

mod calendar;
mod catalog;
mod clock;
mod context;
mod currency;
mod equipment;
mod translate;
mod weather;

pub use calendar::get_ncu_calendar;
pub use catalog::{find_definition, tool_definitions, ToolDefinition};
pub use clock::{current_time_at, get_current_time};
pub use context::{parse_tool_call, ToolCall, ToolContext};
pub use currency::CurrencyClient;
pub use equipment::{get_travel_equipment, EQUIPMENT_ADVICE};
pub use translate::Translator;
pub use weather::WeatherClient;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Tagged result of a tool function.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// `{"status": "success", <key>: <value>}`
    Success { key: &'static str, value: String },
    /// `{"status": "error", "error_message": <message>}`
    Error { message: String },
}

impl ToolOutcome {
    /// Success carrying a `report` payload.
    pub fn report(value: impl Into<String>) -> Self {
        Self::success("report", value)
    }

    pub fn success(key: &'static str, value: impl Into<String>) -> Self {
        ToolOutcome::Success {
            key,
            value: value.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolOutcome::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success { .. })
    }

    /// The payload on success, or the error message.
    pub fn text(&self) -> &str {
        match self {
            ToolOutcome::Success { value, .. } => value,
            ToolOutcome::Error { message } => message,
        }
    }
}

impl Serialize for ToolOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            ToolOutcome::Success { key, value } => {
                map.serialize_entry("status", "success")?;
                map.serialize_entry(key, value)?;
            }
            ToolOutcome::Error { message } => {
                map.serialize_entry("status", "error")?;
                map.serialize_entry("error_message", message)?;
            }
        }
        map.end()
    }
}
