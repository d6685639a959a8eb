/// Translation service port trait
use crate::domain::Language;
use crate::error::Result;
use async_trait::async_trait;

/// Port trait for text translation services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationPort: Send + Sync {
    /// Translate `text` into `target`
    async fn translate(&self, text: &str, target: Language) -> Result<String>;
}
