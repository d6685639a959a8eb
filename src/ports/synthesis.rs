/// Speech synthesis port traits
///
/// `SpeechSynthesisPort` turns text into audio; `SpeechOutputPort` is the
/// fire-and-forget surface the conversation layer talks to.
use crate::error::Result;
use crate::ports::audio::AudioBuffer;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Voice settings for synthesis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Provider voice name (e.g., "en-US-Standard-C")
    pub voice: String,

    /// BCP-47 language tag of the voice
    pub language: String,

    /// Output sample rate in Hz
    pub sample_rate: u32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            voice: "en-US-Standard-C".to_string(),
            language: "en-US".to_string(),
            sample_rate: 24000,
        }
    }
}

/// Port trait for text-to-speech services
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    /// Synthesize `text` into playable audio
    async fn synthesize(&self, text: &str, config: &SynthesisConfig) -> Result<AudioBuffer>;
}

/// Port trait for vocalizing replies
///
/// `speak` must return immediately; audio is produced independently of the caller.
pub trait SpeechOutputPort: Send + Sync {
    fn speak(&self, text: &str);
}
