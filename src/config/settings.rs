//! Configuration settings for Tripmate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Environment variable holding the OpenWeatherMap API key.
pub const WEATHER_API_KEY_ENV: &str = "OPEN_WEATHER_MAP_API_KEY";
/// Environment variable holding the Brave Search API key.
pub const BRAVE_API_KEY_ENV: &str = "BRAVE_API_KEY";
/// Environment variable overriding the agent runtime base URL.
pub const AGENT_SERVER_URL_ENV: &str = "TRIPMATE_AGENT_SERVER_URL";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub relay: RelaySettings,
    pub weather: WeatherSettings,
    pub currency: CurrencySettings,
    pub translate: TranslateSettings,
    pub search: SearchSettings,
    pub agent: AgentSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Front-end relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    /// Host to bind the relay to.
    pub host: String,
    /// Port to bind the relay to.
    pub port: u16,
    /// Base URL of the agent runtime.
    pub agent_server_url: String,
    /// App name registered with the agent runtime.
    pub app_name: String,
    /// Fixed user identifier sent with every run.
    pub user_id: String,
    /// Timeout for the session-registration call, in seconds.
    pub session_timeout_secs: u64,
    /// Timeout for the inference call, in seconds.
    pub run_timeout_secs: u64,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            agent_server_url: "http://localhost:8000".to_string(),
            app_name: "my-first-ai-agent".to_string(),
            user_id: "somebody".to_string(),
            session_timeout_secs: 5,
            run_timeout_secs: 120,
        }
    }
}

/// OpenWeatherMap settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    /// API key (falls back to `OPEN_WEATHER_MAP_API_KEY`).
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "http://api.openweathermap.org".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Frankfurter exchange-rate API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.frankfurter.dev/v1".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Translation endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for TranslateSettings {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Web search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchSettings {
    /// Brave Search API key (falls back to `BRAVE_API_KEY`).
    pub api_key: Option<String>,
}

/// Agent configuration inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Preset used when none is given on the command line.
    pub preset: String,
    /// Model identifier handed to the runtime.
    pub model: String,
    /// Root directory the filesystem tool server may access.
    pub filesystem_root: String,
    /// Launch command for the travel-equipment tool server.
    /// Empty means "this binary, `mcp equipment`".
    pub equipment_command: Vec<String>,
    /// Event-stream URL of the travel-luck tool server.
    pub luck_server_url: String,
    /// Event-stream URL of the CoinGecko tool server.
    pub coingecko_url: String,
    /// Directory holding custom instruction files.
    pub instructions_dir: Option<String>,
    /// Variables available in instructions as {{name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            preset: "travel-planner".to_string(),
            model: "gemini-2.0-flash-lite".to_string(),
            filesystem_root: "~/AIshare".to_string(),
            equipment_command: Vec::new(),
            luck_server_url: "http://127.0.0.1:5002/sse".to_string(),
            coingecko_url: "https://mcp.api.coingecko.com/sse".to_string(),
            instructions_dir: None,
            variables: std::collections::HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Environment overrides are applied after the file is read.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            debug!("Loading config from {:?}", config_path);
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Overlay values from the environment. Empty variables are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(key) = lookup(WEATHER_API_KEY_ENV) {
            self.weather.api_key = Some(key);
        }
        if let Some(key) = lookup(BRAVE_API_KEY_ENV) {
            self.search.api_key = Some(key);
        }
        if let Some(url) = lookup(AGENT_SERVER_URL_ENV) {
            self.relay.agent_server_url = url;
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TripmateError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tripmate")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded filesystem root handed to the filesystem tool server.
    pub fn filesystem_root(&self) -> PathBuf {
        Self::expand_path(&self.agent.filesystem_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.relay.port, 5000);
        assert_eq!(settings.relay.app_name, "my-first-ai-agent");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.relay.port = 8123;
        settings.agent.model = "gemini-test".to_string();
        settings.save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let reloaded: Settings = toml::from_str(&content).unwrap();
        assert_eq!(reloaded.relay.port, 8123);
        assert_eq!(reloaded.agent.model, "gemini-test");
    }

    #[test]
    fn test_partial_file_keeps_section_defaults() {
        let settings: Settings = toml::from_str("[relay]\nport = 9000\n").unwrap();
        assert_eq!(settings.relay.port, 9000);
        assert_eq!(settings.relay.user_id, "somebody");
        assert_eq!(settings.currency.base_url, "https://api.frankfurter.dev/v1");
    }

    #[test]
    fn test_env_overlay() {
        let env: HashMap<&str, &str> = [
            (WEATHER_API_KEY_ENV, "owm-key"),
            (BRAVE_API_KEY_ENV, ""),
            (AGENT_SERVER_URL_ENV, "http://runtime:9000"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(settings.weather.api_key.as_deref(), Some("owm-key"));
        assert_eq!(settings.search.api_key, None);
        assert_eq!(settings.relay.agent_server_url, "http://runtime:9000");
    }
}
