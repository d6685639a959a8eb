//! Google Cloud Translation (v2) adapter

use crate::domain::Language;
use crate::error::{AppError, Result};
use crate::ports::translation::TranslationPort;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TRANSLATE_API_BASE: &str = "https://translation.googleapis.com/language/translate/v2";

/// Google Cloud Translation service implementation
pub struct GoogleTranslateService {
    client: Client,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'static str,
    source: &'static str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

impl GoogleTranslateService {
    /// Create a new translation service with the given API key
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self { client, api_key })
    }

    fn parse_response(response: TranslateResponse) -> Result<String> {
        response
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Translation("No translation returned".to_string()))
    }
}

#[async_trait]
impl TranslationPort for GoogleTranslateService {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        let request_body = TranslateRequest {
            q: text,
            target: target.code(),
            source: Language::English.code(),
            format: "text",
        };

        log::info!("Translating {} characters to {}", text.len(), target.code());

        let response = self
            .client
            .post(TRANSLATE_API_BASE)
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Translation(format!("Translate request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Translation(format!(
                "Translation API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: TranslateResponse = response.json().await.map_err(|e| {
            AppError::Translation(format!("Failed to parse translate response: {}", e))
        })?;

        Self::parse_response(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let response: TranslateResponse = serde_json::from_str(
            r#"{"data":{"translations":[{"translatedText":"Hola","detectedSourceLanguage":"en"}]}}"#,
        )
        .unwrap();
        assert_eq!(GoogleTranslateService::parse_response(response).unwrap(), "Hola");
    }

    #[test]
    fn test_parse_empty_response() {
        let response: TranslateResponse =
            serde_json::from_str(r#"{"data":{"translations":[]}}"#).unwrap();
        assert!(matches!(
            GoogleTranslateService::parse_response(response),
            Err(AppError::Translation(_))
        ));
    }

    #[test]
    fn test_request_uses_language_codes() {
        let request = TranslateRequest {
            q: "hello",
            target: Language::Tamil.code(),
            source: Language::English.code(),
            format: "text",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["target"], "ta");
        assert_eq!(json["source"], "en");
    }
}
