//! Push-to-talk voice input
//!
//! Records one bounded clip from the microphone and hands it to the
//! speech-to-text service.

use crate::error::AppError;
use crate::ports::audio::AudioCapturePort;
use crate::ports::transcription::{TranscriptionConfig, TranscriptionServicePort};
use crate::utils::audio_file::format_audio_info;
use std::sync::Arc;
use std::time::Duration;

/// Result of one listen attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenOutcome {
    /// Speech recognized as text
    Heard(String),
    /// Audio was captured but no words could be made out
    NotUnderstood,
    /// Microphone or recognition backend failed
    ServiceUnavailable(String),
}

/// Microphone plus recognizer
pub struct SpeechInput {
    capture: Arc<dyn AudioCapturePort>,
    recognizer: Arc<dyn TranscriptionServicePort>,
    config: TranscriptionConfig,
}

impl SpeechInput {
    pub fn new(
        capture: Arc<dyn AudioCapturePort>,
        recognizer: Arc<dyn TranscriptionServicePort>,
        config: TranscriptionConfig,
    ) -> Self {
        Self {
            capture,
            recognizer,
            config,
        }
    }

    /// Capture for at most `timeout` and transcribe what was said
    pub async fn listen(&self, timeout: Duration) -> ListenOutcome {
        let audio = match self.capture.record(timeout).await {
            Ok(audio) => audio,
            Err(e) => {
                log::error!("Voice capture failed: {}", e);
                return ListenOutcome::ServiceUnavailable(e.to_string());
            }
        };

        log::info!("Captured voice clip: {}", format_audio_info(&audio));

        if audio.is_empty() {
            return ListenOutcome::NotUnderstood;
        }

        match self.recognizer.transcribe(&audio, &self.config).await {
            Ok(result) if !result.text.trim().is_empty() => {
                ListenOutcome::Heard(result.text.trim().to_string())
            }
            Ok(_) | Err(AppError::NotUnderstood) => {
                log::warn!("Speech was not understood");
                ListenOutcome::NotUnderstood
            }
            Err(e) => {
                log::error!("Voice recognition failed: {}", e);
                ListenOutcome::ServiceUnavailable(e.to_string())
            }
        }
    }
}
