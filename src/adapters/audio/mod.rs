//! Audio device adapters
//!
//! Platform-specific implementations for microphone capture and playback

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use linux::{PulseAudioMicrophone, PulseAudioSpeaker};
