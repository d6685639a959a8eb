//! Google Cloud Text-to-Speech adapter
//!
//! Implements the SpeechSynthesisPort with the `text:synthesize` endpoint.
//! Requests are capped at 5000 bytes of input, so long replies are split on
//! sentence boundaries and the resulting clips concatenated.

use crate::error::{AppError, Result};
use crate::ports::audio::AudioBuffer;
use crate::ports::synthesis::{SpeechSynthesisPort, SynthesisConfig};
use crate::utils::audio_file::decode_wav;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TTS_API_BASE: &str = "https://texttospeech.googleapis.com/v1";

/// Stay under the API's per-request input limit
const MAX_CHUNK_BYTES: usize = 4500;

/// Google Cloud Text-to-Speech service implementation
pub struct GoogleTtsService {
    client: Client,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    sample_rate_hertz: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

impl GoogleTtsService {
    /// Create a new text-to-speech service with the given API key
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self { client, api_key })
    }

    /// Split text into request-sized pieces, preferring sentence ends
    fn split_for_synthesis(text: &str, max_bytes: usize) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for sentence in text.split_inclusive(['.', '!', '?', '\n']) {
            if !current.is_empty() && current.len() + sentence.len() > max_bytes {
                chunks.push(std::mem::take(&mut current));
            }

            if sentence.len() > max_bytes {
                // A single overlong sentence is cut on char boundaries
                let mut piece = String::new();
                for ch in sentence.chars() {
                    if piece.len() + ch.len_utf8() > max_bytes {
                        chunks.push(std::mem::take(&mut piece));
                    }
                    piece.push(ch);
                }
                current = piece;
            } else {
                current.push_str(sentence);
            }
        }

        if !current.trim().is_empty() {
            chunks.push(current);
        }

        chunks
            .into_iter()
            .filter(|c| !c.trim().is_empty())
            .collect()
    }

    async fn synthesize_chunk(&self, text: &str, config: &SynthesisConfig) -> Result<AudioBuffer> {
        let request_body = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: &config.language,
                name: &config.voice,
            },
            audio_config: AudioConfig {
                audio_encoding: "LINEAR16",
                sample_rate_hertz: config.sample_rate,
            },
        };

        let response = self
            .client
            .post(format!("{}/text:synthesize", TTS_API_BASE))
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::SpeechService(format!("Synthesize request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::SpeechService(format!(
                "Text-to-Speech API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: SynthesizeResponse = response.json().await.map_err(|e| {
            AppError::SpeechService(format!("Failed to parse synthesize response: {}", e))
        })?;

        let wav = BASE64
            .decode(parsed.audio_content)
            .map_err(|e| AppError::SpeechService(format!("Invalid audio payload: {}", e)))?;

        decode_wav(&wav)
    }
}

#[async_trait]
impl SpeechSynthesisPort for GoogleTtsService {
    async fn synthesize(&self, text: &str, config: &SynthesisConfig) -> Result<AudioBuffer> {
        let chunks = Self::split_for_synthesis(text, MAX_CHUNK_BYTES);
        if chunks.is_empty() {
            return Err(AppError::InvalidInput("Nothing to synthesize".to_string()));
        }

        log::info!(
            "Synthesizing {} characters in {} request(s)",
            text.len(),
            chunks.len()
        );

        let mut combined: Option<AudioBuffer> = None;
        for chunk in &chunks {
            let clip = self.synthesize_chunk(chunk, config).await?;
            match combined.as_mut() {
                Some(buffer) => buffer.samples.extend(clip.samples),
                None => combined = Some(clip),
            }
        }

        combined.ok_or_else(|| AppError::SpeechService("No audio synthesized".to_string()))
    }
}
