//! Google Gemini chat adapter
//!
//! Implements the ChatModelPort for Google's Gemini `generateContent` API.
//! The API keeps no server-side session, so the conversation history is
//! replayed on every call.

use crate::domain::{ChatMessage, Role};
use crate::error::{AppError, Result};
use crate::ports::llm::{ChatModelPort, LlmConfig};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pause before the single retry of a transient failure
const RETRY_BACKOFF: Duration = Duration::from_millis(750);

/// Google Gemini service implementation
pub struct GoogleService {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Outcome of one HTTP attempt, split by whether a retry may help
enum Attempt {
    Done(Result<String>),
    Transient(AppError),
}

impl GoogleService {
    /// Create a new Gemini service with the given API key and request timeout
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: GOOGLE_API_BASE.to_string(),
        })
    }

    /// Point the service at a different endpoint root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn model_path(model: &str) -> String {
        // Accept both "gemini-pro" and "models/gemini-pro"
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        }
    }

    fn build_request(
        history: &[ChatMessage],
        prompt: &str,
        config: &LlmConfig,
    ) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|message| Content {
                role: match message.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                },
                parts: vec![Part {
                    text: message.content.clone(),
                }],
            })
            .collect();

        contents.push(Content {
            role: "user",
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        });

        let generation_config = if config.temperature.is_some() || config.max_tokens.is_some() {
            Some(GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_tokens,
            })
        } else {
            None
        };

        GenerateContentRequest {
            contents,
            generation_config,
        }
    }

    fn extract_reply(response: GenerateContentResponse) -> Result<String> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(AppError::Llm(format!("Prompt blocked: {}", reason)));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Llm("No candidates returned".to_string()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::Llm(format!(
                "Empty response (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }

    fn is_transient_status(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }

    async fn attempt(&self, request_body: &GenerateContentRequest, model: &str) -> Attempt {
        let url = format!("{}/{}:generateContent", self.base_url, Self::model_path(model));

        let response = match self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(request_body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let error = AppError::Http(e);
                return if error.is_transient() {
                    Attempt::Transient(error)
                } else {
                    Attempt::Done(Err(error))
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let error = AppError::Llm(format!(
                "GenerateContent failed ({}): {}",
                status, error_text
            ));
            return if Self::is_transient_status(status) {
                Attempt::Transient(error)
            } else {
                Attempt::Done(Err(error))
            };
        }

        let parsed = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse content response: {}", e)))
            .and_then(Self::extract_reply);

        Attempt::Done(parsed)
    }
}

#[async_trait]
impl ChatModelPort for GoogleService {
    async fn generate(
        &self,
        history: &[ChatMessage],
        prompt: &str,
        config: &LlmConfig,
    ) -> Result<String> {
        let request_body = Self::build_request(history, prompt, config);

        log::info!(
            "Calling Google generateContent with model: {} ({} prior messages)",
            config.model,
            history.len()
        );

        let reply = match self.attempt(&request_body, &config.model).await {
            Attempt::Done(result) => result,
            Attempt::Transient(error) => {
                log::warn!("Transient Gemini failure, retrying once: {}", error);
                tokio::time::sleep(RETRY_BACKOFF).await;
                match self.attempt(&request_body, &config.model).await {
                    Attempt::Done(result) => result,
                    Attempt::Transient(error) => Err(error),
                }
            }
        }?;

        log::info!(
            "Google completion successful, generated {} characters",
            reply.len()
        );
        Ok(reply)
    }

    fn provider_name(&self) -> &str {
        "google"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
