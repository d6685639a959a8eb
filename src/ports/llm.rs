/// Chat model port trait
///
/// Defines the interface for hosted conversational models.
/// Implementations: Google Gemini
use crate::domain::ChatMessage;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for chat requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name (e.g., "gemini-1.5-flash")
    pub model: String,

    /// Temperature for generation (0.0 to 1.0)
    pub temperature: Option<f32>,

    /// Maximum tokens in response
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Port trait for chat completion services
///
/// Providers are stateless from the caller's view: the full prior history is
/// passed on every call and the provider returns the next assistant message.
#[async_trait]
pub trait ChatModelPort: Send + Sync {
    /// Generate the reply to `prompt` given the earlier conversation
    async fn generate(
        &self,
        history: &[ChatMessage],
        prompt: &str,
        config: &LlmConfig,
    ) -> Result<String>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is configured (has API key)
    fn is_configured(&self) -> bool;
}
