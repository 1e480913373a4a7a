//! Travel phrase translation.

use super::ToolOutcome;
use crate::config::TranslateSettings;
use crate::error::{Result, TripmateError};
use crate::http::{create_client_secs, join_url};
use serde_json::Value;
use tracing::debug;

/// Client for the public translate endpoint (source language auto-detected).
pub struct Translator {
    client: reqwest::Client,
    base_url: String,
}

impl Translator {
    pub fn new(settings: &TranslateSettings) -> Result<Self> {
        Ok(Self {
            client: create_client_secs(settings.timeout_secs)?,
            base_url: settings.base_url.clone(),
        })
    }

    /// Translate `text` into `target_lang` (e.g. "en", "ja", "ko").
    pub async fn get_translate(&self, text: &str, target_lang: &str) -> ToolOutcome {
        match self.translate(text, target_lang).await {
            Ok(translated) => ToolOutcome::report(format!(
                "【翻譯結果】\n原文: {}\n譯文 ({}): {}",
                text, target_lang, translated
            )),
            Err(e) => ToolOutcome::error(format!("翻譯失敗: {}", e)),
        }
    }

    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let data: Value = self
            .client
            .get(join_url(&self.base_url, "translate_a/single"))
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("Translate payload: {}", data);

        join_segments(&data)
            .ok_or_else(|| TripmateError::Tool("unexpected translation response".to_string()))
    }
}

/// The endpoint answers `[[["translated", "original", ...], ...], ...]`.
fn join_segments(data: &Value) -> Option<String> {
    let segments = data.get(0)?.as_array()?;
    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        None
    } else {
        Some(translated)
    }
}
