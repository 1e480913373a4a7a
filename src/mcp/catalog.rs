//! Which tools each tool server exposes.

use crate::tools::{find_definition, ToolDefinition};
use serde::{Deserialize, Serialize};

/// A tool server flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ToolServerKind {
    /// Travel equipment advice.
    Equipment,
    /// Exchange rates, currency conversion and translation.
    Currency,
}

impl ToolServerKind {
    /// Name reported in `initialize`.
    pub fn server_name(&self) -> &'static str {
        match self {
            ToolServerKind::Equipment => "travel_equipment",
            ToolServerKind::Currency => "Frankfurter Currency Server",
        }
    }

    pub fn tool_names(&self) -> &'static [&'static str] {
        match self {
            ToolServerKind::Equipment => &["get_travel_equipment"],
            ToolServerKind::Currency => &["get_exchange_rates", "convert_currency", "get_translate"],
        }
    }

    pub fn exposes(&self, name: &str) -> bool {
        self.tool_names().contains(&name)
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tool_names()
            .iter()
            .filter_map(|name| find_definition(name))
            .collect()
    }
}

impl std::fmt::Display for ToolServerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolServerKind::Equipment => write!(f, "equipment"),
            ToolServerKind::Currency => write!(f, "currency"),
        }
    }
}
