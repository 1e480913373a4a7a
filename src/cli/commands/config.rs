//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, config_path: Option<&str>, settings: Settings) -> Result<()> {
    let path = config_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(Settings::default_config_path);

    match action {
        ConfigAction::Show => {
            let mut shown = settings;
            // Never echo secrets.
            if shown.weather.api_key.is_some() {
                shown.weather.api_key = Some("********".to_string());
            }
            if shown.search.api_key.is_some() {
                shown.search.api_key = Some("********".to_string());
            }
            let toml_str = toml::to_string_pretty(&shown)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Init { force } => {
            if path.exists() && !force {
                Output::warning(&format!("Config already exists at {:?}", path));
                Output::info("Use --force to overwrite.");
                return Ok(());
            }
            let mut settings = settings;
            // Keys come from the environment; keep them out of the file.
            settings.weather.api_key = None;
            settings.search.api_key = None;
            settings.save_to(&path)?;
            Output::success(&format!("Wrote config to {:?}", path));
        }

        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}
