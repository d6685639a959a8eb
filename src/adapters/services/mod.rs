//! External service adapters
//!
//! This module contains adapters for external APIs including:
//! - ASR (Automatic Speech Recognition) services
//! - LLM (Large Language Model) services
//! - TTS (Text-to-Speech) services
//! - Translation services

pub mod asr;
pub mod llm;
pub mod translate;
pub mod tts;
