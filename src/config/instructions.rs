//! Agent instruction templates for Tripmate.
//!
//! Instructions can be customized by placing TOML files in the custom instructions directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all agent instruction templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Instructions {
    pub weather_time: AgentInstruction,
    pub travel_planner: AgentInstruction,
    /// Custom variables from config, available in all instructions.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Description and behavioral instruction for one agent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AgentInstruction {
    pub description: String,
    pub instruction: String,
}

impl AgentInstruction {
    fn weather_time() -> Self {
        Self {
            description: "Agent to answer questions about the time and weather in a city.".to_string(),
            instruction: r#"You are a helpful agent who can answer user questions about the time and weather in a city.
When you call a tool, you must use English for the city name.
當使用者的需求跟檔案存取有關時，請先取得 list_allowed_directories 的結果。
這個資料夾就是預設檔案存取的位置。
請用繁體中文回答問題。"#
                .to_string(),
        }
    }

    fn travel_planner() -> Self {
        Self {
            description: "一個專業的旅遊行程規劃 Agent，能查詢天氣、搜尋景點並產生行程表。".to_string(),
            instruction: r#"你是一位專業且貼心的旅遊行程規劃師。

你的主要任務是協助使用者規劃完美的旅遊行程。你可以使用以下工具：
1. **get_weather**: 查詢目的地天氣。請務必先查天氣，晴天安排戶外，雨天安排室內。
2. **brave_search**: 當你需要尋找具體的景點、餐廳評價、或最新的旅遊資訊時，請使用此工具搜尋。
3. **filesystem**: 用於將最終的行程表寫入 {{filesystem_root}} (請先 list_allowed_directories 確認路徑)。
4. **get_travel_equipment**: 根據天氣查詢必備物品。
5. **travel_luck**: 每天給使用者一個旅遊運勢。

**回答準則：**
* 請一律用**繁體中文**回答。
* 呼叫工具時，城市名稱請使用英文 (例如 Taipei, Tainan)。
* 規劃行程後，主動詢問使用者是否要將行程表存成檔案。"#
                .to_string(),
        }
    }
}

impl Instructions {
    /// Built-in instructions.
    pub fn builtin() -> Self {
        Self {
            weather_time: AgentInstruction::weather_time(),
            travel_planner: AgentInstruction::travel_planner(),
            variables: HashMap::new(),
        }
    }

    /// Load instructions, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut instructions = Self::builtin();

        if let Some(vars) = custom_variables {
            instructions.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let weather_time_path = custom_path.join("weather_time.toml");
            if weather_time_path.exists() {
                let content = std::fs::read_to_string(&weather_time_path)?;
                instructions.weather_time = toml::from_str(&content)?;
            }

            let travel_planner_path = custom_path.join("travel_planner.toml");
            if travel_planner_path.exists() {
                let content = std::fs::read_to_string(&travel_planner_path)?;
                instructions.travel_planner = toml::from_str(&content)?;
            }
        }

        Ok(instructions)
    }

    /// Render a template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_instructions() {
        let instructions = Instructions::builtin();
        assert!(instructions.weather_time.instruction.contains("English"));
        assert!(instructions.travel_planner.instruction.contains("繁體中文"));
    }

    #[test]
    fn test_render_template() {
        let template = "Write to {{filesystem_root}} for {{name}}.";
        let mut vars = HashMap::new();
        vars.insert("filesystem_root".to_string(), "/srv/share".to_string());
        vars.insert("name".to_string(), "Alice".to_string());

        assert_eq!(Instructions::render(template, &vars), "Write to /srv/share for Alice.");
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut custom = HashMap::new();
        custom.insert("city".to_string(), "Tainan".to_string());
        let instructions = Instructions::load(None, Some(&custom)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("city".to_string(), "Taipei".to_string());
        assert_eq!(instructions.render_with_custom("{{city}}", &vars), "Taipei");
        assert_eq!(instructions.render_with_custom("{{city}}", &HashMap::new()), "Tainan");
    }

    #[test]
    fn test_custom_dir_overrides_one_agent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("weather_time.toml"),
            "description = \"custom\"\ninstruction = \"Answer briefly.\"\n",
        )
        .unwrap();

        let instructions = Instructions::load(dir.path().to_str(), None).unwrap();
        assert_eq!(instructions.weather_time.instruction, "Answer briefly.");
        assert!(instructions.travel_planner.instruction.contains("旅遊"));
    }
}
