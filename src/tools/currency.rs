//! Exchange rates and currency conversion via the Frankfurter API.

use super::ToolOutcome;
use crate::config::CurrencySettings;
use crate::error::Result;
use crate::http::{create_client_secs, join_url};
use serde_json::Value;
use tracing::debug;

/// Frankfurter API client.
pub struct CurrencyClient {
    client: reqwest::Client,
    base_url: String,
}

/// Why a Frankfurter request failed.
enum FetchError {
    Status { status: u16, body: String },
    Other(String),
}

impl FetchError {
    fn into_outcome(self) -> ToolOutcome {
        match self {
            FetchError::Status { status, body } => {
                ToolOutcome::error(format!("API 請求錯誤: {} - {}", status, body))
            }
            FetchError::Other(message) => ToolOutcome::error(format!("發生錯誤: {}", message)),
        }
    }
}

impl CurrencyClient {
    pub fn new(settings: &CurrencySettings) -> Result<Self> {
        Ok(Self {
            client: create_client_secs(settings.timeout_secs)?,
            base_url: settings.base_url.clone(),
        })
    }

    /// Latest rates against `base`, optionally restricted to comma-separated `symbols`.
    pub async fn get_exchange_rates(&self, base: &str, symbols: Option<&str>) -> ToolOutcome {
        let mut params = vec![("base", base.to_uppercase())];
        if let Some(symbols) = symbols.filter(|s| !s.trim().is_empty()) {
            params.push(("symbols", symbols.to_uppercase()));
        }

        let data = match self.latest(&params).await {
            Ok(data) => data,
            Err(e) => return e.into_outcome(),
        };

        let mut report = format!(
            "基準貨幣: {} (日期: {})\n匯率列表:\n",
            display(&data["base"]),
            display(&data["date"])
        );
        if let Some(rates) = data["rates"].as_object() {
            for (currency, rate) in rates {
                report.push_str(&format!("- {}: {}\n", currency, rate));
            }
        }

        ToolOutcome::report(report)
    }

    /// Convert `amount` from one currency to another.
    pub async fn convert_currency(&self, amount: f64, from_curr: &str, to_curr: &str) -> ToolOutcome {
        let from = from_curr.to_uppercase();
        let to = to_curr.to_uppercase();
        let params = vec![
            ("amount", amount.to_string()),
            ("from", from.clone()),
            ("to", to.clone()),
        ];

        let data = match self.latest(&params).await {
            Ok(data) => data,
            Err(e) => return e.into_outcome(),
        };

        match data["rates"].get(&to) {
            Some(Value::Number(converted)) => ToolOutcome::report(format!(
                "{} {} = {} {} (日期: {})",
                amount,
                from,
                converted,
                to,
                display(&data["date"])
            )),
            _ => ToolOutcome::error(format!("無法找到目標貨幣 {} 的匯率。", to_curr)),
        }
    }

    async fn latest(&self, params: &[(&str, String)]) -> std::result::Result<Value, FetchError> {
        let response = self
            .client
            .get(join_url(&self.base_url, "latest"))
            .query(params)
            .send()
            .await
            .map_err(|e| FetchError::Other(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Other(e.to_string()))?;
        debug!("Frankfurter payload: {}", data);
        Ok(data)
    }
}

/// Render a JSON scalar without quotes; null becomes "None".
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}
