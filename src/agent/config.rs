//! Declarative agent bundle handed to the agent runtime.

use crate::error::{Result, TripmateError};
use crate::tools::find_definition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Identity, model, instruction and tools of one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub model: String,
    pub description: String,
    pub instruction: String,
    pub tools: Vec<ToolReference>,
}

/// A tool the runtime may invoke: a native function or a tool server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolReference {
    Function {
        name: String,
        description: String,
    },
    Toolset {
        connection: ConnectionParams,
        /// Only expose these operations; empty exposes all.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_filter: Vec<String>,
    },
}

impl ToolReference {
    /// Reference a native tool function from the catalogue.
    pub fn function(name: &str) -> Result<Self> {
        let def = find_definition(name).ok_or_else(|| TripmateError::UnknownTool(name.to_string()))?;
        Ok(ToolReference::Function {
            name: def.name.to_string(),
            description: def.description.to_string(),
        })
    }

    pub fn toolset(connection: ConnectionParams) -> Self {
        ToolReference::Toolset {
            connection,
            tool_filter: Vec::new(),
        }
    }
}

/// How the runtime reaches a tool server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "transport", rename_all = "snake_case")]
pub enum ConnectionParams {
    /// Launch a local process and talk over its stdio.
    Stdio {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        /// Inherit the runtime's environment before applying `env`.
        #[serde(default)]
        inherit_env: bool,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        env: BTreeMap<String, String>,
    },
    /// Connect to a server-sent-events endpoint.
    Sse {
        url: Url,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        headers: BTreeMap<String, String>,
    },
}

impl ConnectionParams {
    pub fn stdio<I, S>(command: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConnectionParams::Stdio {
            command: command.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            inherit_env: false,
            env: BTreeMap::new(),
        }
    }

    pub fn sse(url: &str) -> Result<Self> {
        Ok(ConnectionParams::Sse {
            url: Url::parse(url)?,
            headers: BTreeMap::new(),
        })
    }

    /// Inherit the parent environment and override `key`.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        if let ConnectionParams::Stdio {
            inherit_env, env, ..
        } = &mut self
        {
            *inherit_env = true;
            env.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Effective environment for a stdio launch: the parent's variables (if
    /// inherited) overlaid with explicit overrides. Empty for SSE.
    pub fn resolved_env<I>(&self, parent: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        match self {
            ConnectionParams::Stdio {
                inherit_env, env, ..
            } => {
                let mut resolved: BTreeMap<String, String> = if *inherit_env {
                    parent.into_iter().collect()
                } else {
                    BTreeMap::new()
                };
                resolved.extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
                resolved
            }
            ConnectionParams::Sse { .. } => BTreeMap::new(),
        }
    }

    /// Short human-readable form, e.g. `npx -y server` or the URL.
    pub fn display_target(&self) -> String {
        match self {
            ConnectionParams::Stdio { command, args, .. } => {
                std::iter::once(command.as_str())
                    .chain(args.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ")
            }
            ConnectionParams::Sse { url, .. } => url.to_string(),
        }
    }
}

impl AgentConfig {
    /// Names of the native tool functions, in declaration order.
    pub fn function_names(&self) -> Vec<&str> {
        self.tools
            .iter()
            .filter_map(|t| match t {
                ToolReference::Function { name, .. } => Some(name.as_str()),
                ToolReference::Toolset { .. } => None,
            })
            .collect()
    }

    /// Check the bundle is usable by the runtime.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TripmateError::Config("agent name is empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(TripmateError::Config(format!("agent '{}' has no model", self.name)));
        }

        let mut seen = std::collections::HashSet::new();
        for tool in &self.tools {
            match tool {
                ToolReference::Function { name, .. } => {
                    if find_definition(name).is_none() {
                        return Err(TripmateError::UnknownTool(name.clone()));
                    }
                    if !seen.insert(name.as_str()) {
                        return Err(TripmateError::Config(format!(
                            "tool '{}' is declared twice",
                            name
                        )));
                    }
                }
                ToolReference::Toolset {
                    connection: ConnectionParams::Stdio { command, .. },
                    ..
                } if command.trim().is_empty() => {
                    return Err(TripmateError::Config(
                        "tool server launch command is empty".to_string(),
                    ));
                }
                ToolReference::Toolset { .. } => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_function_reference_from_catalogue() {
        let tool = ToolReference::function("get_weather").unwrap();
        assert!(matches!(tool, ToolReference::Function { ref name, .. } if name == "get_weather"));
        assert!(ToolReference::function("teleport").is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let tool = ToolReference::toolset(ConnectionParams::sse("http://127.0.0.1:5002/sse").unwrap());
        assert_eq!(
            serde_json::to_value(&tool).unwrap(),
            json!({
                "kind": "toolset",
                "connection": {"transport": "sse", "url": "http://127.0.0.1:5002/sse"}
            })
        );
    }

    #[test]
    fn test_resolved_env_overrides_parent() {
        let params = ConnectionParams::stdio("npx", ["-y", "@modelcontextprotocol/server-brave-search"])
            .with_env("BRAVE_API_KEY", "secret");

        let parent = vec![
            ("PATH".to_string(), "/usr/bin".to_string()),
            ("BRAVE_API_KEY".to_string(), "stale".to_string()),
        ];
        let env = params.resolved_env(parent);
        assert_eq!(env["PATH"], "/usr/bin");
        assert_eq!(env["BRAVE_API_KEY"], "secret");
    }

    #[test]
    fn test_stdio_without_inherit_has_clean_env() {
        let params = ConnectionParams::stdio("uv", ["run", "server.py"]);
        let env = params.resolved_env(vec![("HOME".to_string(), "/root".to_string())]);
        assert!(env.is_empty());
        assert_eq!(params.display_target(), "uv run server.py");
    }

    #[test]
    fn test_validate_duplicate_function() {
        let config = AgentConfig {
            name: "a".to_string(),
            model: "m".to_string(),
            description: String::new(),
            instruction: String::new(),
            tools: vec![
                ToolReference::function("get_weather").unwrap(),
                ToolReference::function("get_weather").unwrap(),
            ],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_command() {
        let config = AgentConfig {
            name: "a".to_string(),
            model: "m".to_string(),
            description: String::new(),
            instruction: String::new(),
            tools: vec![ToolReference::toolset(ConnectionParams::stdio("", Vec::<String>::new()))],
        };
        assert!(config.validate().is_err());
    }
}
