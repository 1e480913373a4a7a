//! Doctor command - verify API keys, helper tools and the agent runtime.

use crate::cli::Output;
use crate::config::{Settings, BRAVE_API_KEY_ENV, WEATHER_API_KEY_ENV};
use crate::relay::HttpAgentRuntime;
use console::style;
use std::path::Path;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Tripmate Doctor");
    println!();
    println!("Checking API keys, helper tools and the agent runtime...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Keys").bold());
    let key_checks = vec![
        check_api_key(
            WEATHER_API_KEY_ENV,
            settings.weather.api_key.as_deref(),
            "get_weather will report that the key is not set",
        ),
        check_api_key(
            BRAVE_API_KEY_ENV,
            settings.search.api_key.as_deref(),
            "the brave-search tool server will reject requests",
        ),
    ];
    for check in &key_checks {
        check.print();
    }
    checks.extend(key_checks);

    println!();

    println!("{}", style("Tool Servers").bold());
    let npx_check = check_tool("npx", "npx --version", "Install Node.js to run the filesystem and search servers");
    npx_check.print();
    checks.push(npx_check);
    let root_check = check_filesystem_root(&settings.filesystem_root());
    root_check.print();
    checks.push(root_check);

    println!();

    println!("{}", style("Agent Runtime").bold());
    let runtime_check = check_agent_runtime(settings).await;
    runtime_check.print();
    checks.push(runtime_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before starting the relay.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Tripmate is ready to use.");
    }

    Ok(())
}

/// Check an optional API key; a missing key only degrades one tool.
fn check_api_key(name: &str, value: Option<&str>, impact: &str) -> CheckResult {
    match value {
        Some(key) if !key.is_empty() => {
            CheckResult::ok(name, &format!("configured ({})", mask_key(key)))
        }
        _ => CheckResult::warning(
            name,
            "not set",
            &format!("Set with: export {}=... ({})", name, impact),
        ),
    }
}

/// Keep the last four characters of a secret.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// Check if an external tool is available.
fn check_tool(name: &str, version_cmd: &str, hint: &str) -> CheckResult {
    let mut parts = version_cmd.split_whitespace();
    let Some(cmd) = parts.next() else {
        return CheckResult::error(name, "no command given", hint);
    };

    match Command::new(cmd).args(parts).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();
            CheckResult::ok(name, &version)
        }
        Ok(_) => CheckResult::warning(name, "installed but not working", hint),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::warning(name, "not found", hint)
        }
        Err(e) => CheckResult::warning(name, &format!("error: {}", e), hint),
    }
}

fn check_filesystem_root(root: &Path) -> CheckResult {
    if root.is_dir() {
        CheckResult::ok("Shared folder", &format!("{}", root.display()))
    } else {
        CheckResult::warning(
            "Shared folder",
            &format!("{} (missing)", root.display()),
            "Create it or set agent.filesystem_root so the agent can save itineraries",
        )
    }
}

async fn check_agent_runtime(settings: &Settings) -> CheckResult {
    let url = &settings.relay.agent_server_url;
    match HttpAgentRuntime::new(&settings.relay) {
        Ok(runtime) if runtime.ping().await => CheckResult::ok("Agent runtime", url),
        Ok(_) => CheckResult::error(
            "Agent runtime",
            &format!("{} (unreachable)", url),
            "Start the agent runtime server or set relay.agent_server_url",
        ),
        Err(e) => CheckResult::error(
            "Agent runtime",
            &format!("client error: {}", e),
            "Check relay settings",
        ),
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: tripmate config init",
        )
    }
}
