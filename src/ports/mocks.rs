//! Mock implementations for testing

use crate::domain::ChatMessage;
use crate::error::{AppError, Result};
use crate::ports::audio::{AudioBuffer, AudioCapturePort, AudioFormat, AudioPlaybackPort};
use crate::ports::llm::{ChatModelPort, LlmConfig};
use crate::ports::synthesis::{SpeechOutputPort, SpeechSynthesisPort, SynthesisConfig};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A call received by [`MockChatModel`]
#[derive(Debug, Clone)]
pub struct RecordedChatCall {
    pub history: Vec<ChatMessage>,
    pub prompt: String,
}

/// Scripted chat model that records every request
///
/// Replies are served in order; once the script runs out every call echoes
/// `"reply to: <prompt>"`.
#[derive(Clone, Default)]
pub struct MockChatModel {
    script: Arc<Mutex<VecDeque<Result<String>>>>,
    calls: Arc<Mutex<Vec<RecordedChatCall>>>,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(reply.to_string()));
    }

    pub fn push_failure(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(AppError::Llm(message.to_string())));
    }

    pub fn calls(&self) -> Vec<RecordedChatCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().unwrap().last().map(|c| c.prompt.clone())
    }
}

#[async_trait]
impl ChatModelPort for MockChatModel {
    async fn generate(
        &self,
        history: &[ChatMessage],
        prompt: &str,
        _config: &LlmConfig,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedChatCall {
            history: history.to_vec(),
            prompt: prompt.to_string(),
        });

        match self.script.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(format!("reply to: {}", prompt)),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        true
    }
}

/// Speech output that only remembers what it was asked to say
#[derive(Clone, Default)]
pub struct RecordingSpeechOutput {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl RecordingSpeechOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SpeechOutputPort for RecordingSpeechOutput {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}

/// Microphone returning a fixed clip, or failing
#[derive(Clone)]
pub struct MockCapture {
    fail: bool,
    requested: Arc<Mutex<Vec<Duration>>>,
}

impl MockCapture {
    pub fn new() -> Self {
        Self {
            fail: false,
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn requested(&self) -> Vec<Duration> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioCapturePort for MockCapture {
    async fn record(&self, max_duration: Duration) -> Result<AudioBuffer> {
        self.requested.lock().unwrap().push(max_duration);
        if self.fail {
            return Err(AppError::AudioCapture("no input device".to_string()));
        }
        Ok(AudioBuffer {
            samples: vec![0.1; 1600],
            format: AudioFormat::default(),
        })
    }

    fn get_format(&self) -> AudioFormat {
        AudioFormat::default()
    }
}

/// Synthesizer producing a short silent clip per request
#[derive(Clone, Default)]
pub struct MockSynthesizer {
    texts: Arc<Mutex<Vec<String>>>,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesisPort for MockSynthesizer {
    async fn synthesize(&self, text: &str, config: &SynthesisConfig) -> Result<AudioBuffer> {
        self.texts.lock().unwrap().push(text.to_string());
        if text.is_empty() {
            return Err(AppError::SpeechService("nothing to say".to_string()));
        }
        Ok(AudioBuffer {
            samples: vec![0.0; 240],
            format: AudioFormat {
                sample_rate: config.sample_rate,
                channels: 1,
                bits_per_sample: 16,
            },
        })
    }
}

/// Player that counts played buffers
#[derive(Clone, Default)]
pub struct MockPlayer {
    played: Arc<Mutex<usize>>,
}

impl MockPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> usize {
        *self.played.lock().unwrap()
    }
}

#[async_trait]
impl AudioPlaybackPort for MockPlayer {
    async fn play(&self, _buffer: &AudioBuffer) -> Result<()> {
        *self.played.lock().unwrap() += 1;
        Ok(())
    }
}
