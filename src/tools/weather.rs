//! Current weather via OpenWeatherMap.

use super::ToolOutcome;
use crate::config::WeatherSettings;
use crate::error::Result;
use crate::http::{create_client_secs, join_url};
use serde_json::Value;
use tracing::debug;

/// Weather lookup client.
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    /// Create a client from settings. A missing API key is not an error here;
    /// it surfaces as an error outcome on each call.
    pub fn new(settings: &WeatherSettings) -> Result<Self> {
        Ok(Self {
            client: create_client_secs(settings.timeout_secs)?,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    /// Retrieve the current weather report for a city (English name).
    pub async fn get_weather(&self, city: &str) -> ToolOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            return ToolOutcome::error("API key for OpenWeatherMap is not set.");
        };

        match self.fetch(city, api_key).await {
            Ok(data) => {
                debug!("OpenWeatherMap payload: {}", data);
                report_from_payload(city, &data)
            }
            Err(e) => ToolOutcome::error(format!(
                "An error occurred while fetching the weather data: {}",
                e
            )),
        }
    }

    async fn fetch(&self, city: &str, api_key: &str) -> std::result::Result<Value, reqwest::Error> {
        self.client
            .get(join_url(&self.base_url, "data/2.5/weather"))
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

/// Build the outcome from an OpenWeatherMap response body.
fn report_from_payload(city: &str, data: &Value) -> ToolOutcome {
    let cod_ok = match &data["cod"] {
        Value::Number(n) => n.as_i64() == Some(200),
        Value::String(s) => s == "200",
        _ => false,
    };
    if !cod_ok {
        return not_available(city);
    }

    let description = data["weather"][0]["description"].as_str();
    let temperature = match &data["main"]["temp"] {
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };

    match (description, temperature) {
        (Some(description), Some(temperature)) => ToolOutcome::report(format!(
            "The weather in {} is {} with a temperature of {} degrees Celsius.",
            city, description, temperature
        )),
        _ => not_available(city),
    }
}

fn not_available(city: &str) -> ToolOutcome {
    ToolOutcome::error(format!("Weather information for '{}' is not available.", city))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base_url: &str, api_key: Option<&str>) -> WeatherSettings {
        WeatherSettings {
            api_key: api_key.map(str::to_string),
            base_url: base_url.to_string(),
            timeout_secs: 2,
        }
    }

    #[tokio::test]
    async fn test_weather_report() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Taipei"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": 200,
                "weather": [{"main": "Clouds", "description": "broken clouds"}],
                "main": {"temp": 25.5}
            })))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(&settings(&mock_server.uri(), Some("test-key"))).unwrap();
        let outcome = client.get_weather("Taipei").await;

        assert_eq!(
            outcome,
            ToolOutcome::report(
                "The weather in Taipei is broken clouds with a temperature of 25.5 degrees Celsius."
            )
        );
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = WeatherClient::new(&settings("http://127.0.0.1:1", None)).unwrap();
        let outcome = client.get_weather("Taipei").await;
        assert_eq!(outcome, ToolOutcome::error("API key for OpenWeatherMap is not set."));
    }

    #[tokio::test]
    async fn test_network_failure_is_error_outcome() {
        // Nothing listens on port 1.
        let client = WeatherClient::new(&settings("http://127.0.0.1:1", Some("k"))).unwrap();
        let value = serde_json::to_value(client.get_weather("Taipei").await).unwrap();

        assert_eq!(value["status"], "error");
        let message = value["error_message"].as_str().unwrap();
        assert!(message.starts_with("An error occurred while fetching the weather data:"));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"cod": "404"})))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(&settings(&mock_server.uri(), Some("k"))).unwrap();
        let outcome = client.get_weather("Atlantis").await;
        assert!(!outcome.is_success());
        assert!(!outcome.text().is_empty());
    }

    #[test]
    fn test_unexpected_cod() {
        let outcome = report_from_payload("Nowhere", &json!({"cod": "404", "message": "city not found"}));
        assert_eq!(
            outcome,
            ToolOutcome::error("Weather information for 'Nowhere' is not available.")
        );
    }

    #[test]
    fn test_malformed_payload() {
        let outcome = report_from_payload("Taipei", &json!({"cod": 200, "weather": []}));
        assert!(!outcome.is_success());
    }
}
