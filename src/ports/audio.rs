/// Audio device port traits
///
/// Defines the interface for microphone capture and speaker playback.
/// Platform-specific implementations in adapters/audio/
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Represents audio format specifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            sample_rate: 16000, // 16kHz is standard for speech recognition
            channels: 1,        // Mono
            bits_per_sample: 16,
        }
    }
}

/// Audio buffer containing normalized samples in [-1.0, 1.0]
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub format: AudioFormat,
}

impl AudioBuffer {
    pub fn duration(&self) -> Duration {
        let frames = self.samples.len() / self.format.channels.max(1) as usize;
        Duration::from_secs_f64(frames as f64 / self.format.sample_rate.max(1) as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Port trait for microphone capture
#[async_trait]
pub trait AudioCapturePort: Send + Sync {
    /// Records from the default input device for at most `max_duration`
    ///
    /// Capture may end earlier once the speaker falls silent.
    async fn record(&self, max_duration: Duration) -> Result<AudioBuffer>;

    /// Gets the audio format being captured
    fn get_format(&self) -> AudioFormat;
}

/// Port trait for speaker playback
#[async_trait]
pub trait AudioPlaybackPort: Send + Sync {
    /// Plays the buffer on the default output device, returning when done
    async fn play(&self, buffer: &AudioBuffer) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_duration() {
        let buffer = AudioBuffer {
            samples: vec![0.0; 32000],
            format: AudioFormat::default(),
        };
        assert_eq!(buffer.duration(), Duration::from_secs(2));

        let stereo = AudioBuffer {
            samples: vec![0.0; 48000],
            format: AudioFormat {
                sample_rate: 24000,
                channels: 2,
                bits_per_sample: 16,
            },
        };
        assert_eq!(stereo.duration(), Duration::from_secs(1));
    }
}
