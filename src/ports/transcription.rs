/// Transcription service port trait
///
/// Defines the interface for speech-to-text services.
/// Implementations: Google Cloud Speech-to-Text
use crate::error::Result;
use crate::ports::audio::AudioBuffer;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Represents a recognized utterance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// Full transcript text
    pub text: String,

    /// Overall confidence score (0.0 to 1.0)
    pub confidence: Option<f32>,
}

/// Configuration for a transcription request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// BCP-47 language tag of the speech (e.g., "en-US")
    pub language: String,

    /// Add punctuation to the transcript
    pub punctuate: bool,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            punctuate: true,
        }
    }
}

/// Port trait for transcription services (ASR)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptionServicePort: Send + Sync {
    /// Transcribe a captured audio buffer
    ///
    /// Returns `AppError::NotUnderstood` when the audio holds no recognizable speech.
    async fn transcribe(
        &self,
        audio: &AudioBuffer,
        config: &TranscriptionConfig,
    ) -> Result<TranscriptionResult>;
}
