//! ASR (Automatic Speech Recognition) service adapters
//!
//! - Google Cloud Speech-to-Text: synchronous REST recognition of short clips

pub mod google;

pub use google::GoogleSpeechService;
