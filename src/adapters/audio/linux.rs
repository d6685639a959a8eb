//! Linux PulseAudio microphone and speaker implementation
//!
//! Uses the PulseAudio simple API against the default source and sink.
//! Capture runs on a blocking thread and stops at the time limit or once the
//! speaker has been quiet for a moment after talking.

use crate::error::{AppError, Result};
use crate::ports::audio::{AudioBuffer, AudioCapturePort, AudioFormat, AudioPlaybackPort};
use crate::utils::audio_file::{f32_to_i16, rms};
use async_trait::async_trait;
use libpulse_binding::sample::{Format, Spec};
use libpulse_binding::stream::Direction;
use libpulse_simple_binding::Simple;
use std::time::{Duration, Instant};

const APP_NAME: &str = "GenieTalk";

/// Length of one read from the device
const CHUNK: Duration = Duration::from_millis(100);

/// Chunk RMS above this counts as speech
const SPEECH_THRESHOLD: f32 = 0.02;

/// Quiet time after speech that ends the phrase
const TRAILING_SILENCE: Duration = Duration::from_millis(1200);

/// Tracks whether a phrase has started and ended
#[derive(Debug, Default)]
struct PhraseDetector {
    heard_speech: bool,
    silent_for: Duration,
}

impl PhraseDetector {
    /// Feed one chunk; returns true once the phrase is over
    fn observe(&mut self, level: f32, chunk: Duration) -> bool {
        if level >= SPEECH_THRESHOLD {
            self.heard_speech = true;
            self.silent_for = Duration::ZERO;
            return false;
        }

        if self.heard_speech {
            self.silent_for += chunk;
        }
        self.heard_speech && self.silent_for >= TRAILING_SILENCE
    }
}

/// Linux PulseAudio microphone
///
/// Audio format: 16000 Hz, mono, 16-bit signed little-endian
pub struct PulseAudioMicrophone {
    format: AudioFormat,
}

impl PulseAudioMicrophone {
    pub fn new() -> Self {
        Self {
            format: AudioFormat::default(),
        }
    }

    /// Convert audio samples from i16 to f32 normalized format
    fn convert_samples(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(2)
            .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]) as f32 / 32768.0)
            .collect()
    }

    fn capture_blocking(format: AudioFormat, max_duration: Duration) -> Result<AudioBuffer> {
        let spec = Spec {
            format: Format::S16le,
            channels: format.channels as u8,
            rate: format.sample_rate,
        };

        let simple = Simple::new(
            None,              // Use default server
            APP_NAME,          // Application name
            Direction::Record, // Recording
            None,              // Default source (microphone)
            "Voice Input",     // Stream description
            &spec,             // Sample spec
            None,              // Use default channel map
            None,              // Use default buffering attributes
        )
        .map_err(|e| AppError::AudioCapture(format!("Failed to open microphone: {}", e)))?;

        let frames_per_chunk = (format.sample_rate as u128 * CHUNK.as_millis() / 1000) as usize;
        let mut read_buffer = vec![0u8; frames_per_chunk * format.channels as usize * 2];
        let mut samples = Vec::new();
        let mut detector = PhraseDetector::default();
        let started = Instant::now();

        log::info!("Listening for up to {:.1}s", max_duration.as_secs_f32());

        while started.elapsed() < max_duration {
            simple
                .read(&mut read_buffer)
                .map_err(|e| AppError::AudioCapture(format!("Failed to read microphone: {}", e)))?;

            let chunk = Self::convert_samples(&read_buffer);
            let level = rms(&chunk);
            samples.extend(chunk);

            if detector.observe(level, CHUNK) {
                log::debug!("End of phrase detected");
                break;
            }
        }

        Ok(AudioBuffer { samples, format })
    }
}

impl Default for PulseAudioMicrophone {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCapturePort for PulseAudioMicrophone {
    async fn record(&self, max_duration: Duration) -> Result<AudioBuffer> {
        let format = self.format.clone();
        tokio::task::spawn_blocking(move || Self::capture_blocking(format, max_duration))
            .await
            .map_err(|e| AppError::AudioCapture(format!("Task join error: {}", e)))?
    }

    fn get_format(&self) -> AudioFormat {
        self.format.clone()
    }
}

/// Linux PulseAudio speaker output
#[derive(Default)]
pub struct PulseAudioSpeaker;

impl PulseAudioSpeaker {
    pub fn new() -> Self {
        Self
    }

    fn to_bytes(samples: &[f32]) -> Vec<u8> {
        samples
            .iter()
            .flat_map(|&s| f32_to_i16(s).to_le_bytes())
            .collect()
    }

    fn play_blocking(buffer: AudioBuffer) -> Result<()> {
        let spec = Spec {
            format: Format::S16le,
            channels: buffer.format.channels as u8,
            rate: buffer.format.sample_rate,
        };

        let simple = Simple::new(
            None,
            APP_NAME,
            Direction::Playback,
            None, // Default sink
            "Speech Output",
            &spec,
            None,
            None,
        )
        .map_err(|e| AppError::AudioPlayback(format!("Failed to open speaker: {}", e)))?;

        simple
            .write(&Self::to_bytes(&buffer.samples))
            .map_err(|e| AppError::AudioPlayback(format!("Failed to write audio: {}", e)))?;

        simple
            .drain()
            .map_err(|e| AppError::AudioPlayback(format!("Failed to drain audio: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl AudioPlaybackPort for PulseAudioSpeaker {
    async fn play(&self, buffer: &AudioBuffer) -> Result<()> {
        let buffer = buffer.clone();
        tokio::task::spawn_blocking(move || Self::play_blocking(buffer))
            .await
            .map_err(|e| AppError::AudioPlayback(format!("Task join error: {}", e)))?
    }
}
