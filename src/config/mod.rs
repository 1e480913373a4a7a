//! Configuration module for Tripmate.
//!
//! Handles loading and managing application settings and agent instruction templates.

mod instructions;
mod settings;

pub use instructions::{AgentInstruction, Instructions};
pub use settings::{
    AgentSettings, CurrencySettings, GeneralSettings, RelaySettings, SearchSettings, Settings,
    TranslateSettings, WeatherSettings, AGENT_SERVER_URL_ENV, BRAVE_API_KEY_ENV,
    WEATHER_API_KEY_ENV,
};
