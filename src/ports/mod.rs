/// Port trait definitions (interfaces)
///
/// These traits define the contracts for adapters to implement.
/// Following the ports-and-adapters (hexagonal) architecture pattern.
pub mod audio;
pub mod llm;
pub mod synthesis;
pub mod transcription;
pub mod translation;

#[cfg(test)]
pub mod mocks;

pub use audio::{AudioBuffer, AudioCapturePort, AudioFormat, AudioPlaybackPort};
pub use llm::{ChatModelPort, LlmConfig};
pub use synthesis::{SpeechOutputPort, SpeechSynthesisPort, SynthesisConfig};
pub use transcription::{TranscriptionConfig, TranscriptionResult, TranscriptionServicePort};
pub use translation::TranslationPort;
