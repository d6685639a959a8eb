//! Background vocalization worker
//!
//! `speak` only enqueues text. A single task drains the queue, synthesizes
//! each reply and plays it, so clips never overlap and the caller never waits.

use crate::ports::audio::AudioPlaybackPort;
use crate::ports::synthesis::{SpeechOutputPort, SpeechSynthesisPort, SynthesisConfig};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Queue-fed text-to-speech output
pub struct SpeechOutput {
    queue: mpsc::UnboundedSender<String>,
}

impl SpeechOutput {
    /// Start the worker on the current tokio runtime
    ///
    /// The worker exits once every `SpeechOutput` handle has been dropped and
    /// the queue is drained.
    pub fn spawn(
        synthesizer: Arc<dyn SpeechSynthesisPort>,
        player: Arc<dyn AudioPlaybackPort>,
        config: SynthesisConfig,
    ) -> (Self, JoinHandle<()>) {
        let (queue, mut rx) = mpsc::unbounded_channel::<String>();

        let worker = tokio::spawn(async move {
            while let Some(text) = rx.recv().await {
                let audio = match synthesizer.synthesize(&text, &config).await {
                    Ok(audio) => audio,
                    Err(e) => {
                        log::warn!("Speech synthesis failed: {}", e);
                        continue;
                    }
                };

                if let Err(e) = player.play(&audio).await {
                    log::warn!("Speech playback failed: {}", e);
                }
            }
            log::debug!("Speech output worker stopped");
        });

        (Self { queue }, worker)
    }
}

impl SpeechOutputPort for SpeechOutput {
    fn speak(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        if self.queue.send(text.to_string()).is_err() {
            log::warn!("Speech output worker is gone; reply not spoken");
        }
    }
}

/// Speech output that discards everything, for sessions without audio
#[derive(Debug, Default, Clone, Copy)]
pub struct MutedSpeechOutput;

impl SpeechOutputPort for MutedSpeechOutput {
    fn speak(&self, _text: &str) {}
}
