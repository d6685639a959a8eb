//! TTS (Text-to-Speech) service adapters

pub mod google;

pub use google::GoogleTtsService;
