//! Google Cloud Speech-to-Text adapter
//!
//! Implements the TranscriptionServicePort with the synchronous
//! `speech:recognize` endpoint, which suits short push-to-talk clips.

use crate::error::{AppError, Result};
use crate::ports::audio::AudioBuffer;
use crate::ports::transcription::{
    TranscriptionConfig, TranscriptionResult, TranscriptionServicePort,
};
use crate::utils::audio_file::encode_wav;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SPEECH_API_BASE: &str = "https://speech.googleapis.com/v1";

/// Google Cloud Speech-to-Text service implementation
pub struct GoogleSpeechService {
    client: Client,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    encoding: &'static str,
    sample_rate_hertz: u32,
    audio_channel_count: u16,
    language_code: String,
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
    confidence: Option<f32>,
}

impl GoogleSpeechService {
    /// Create a new speech service with the given API key
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self { client, api_key })
    }

    fn build_request(audio: &AudioBuffer, config: &TranscriptionConfig) -> Result<RecognizeRequest> {
        let wav = encode_wav(audio)?;

        Ok(RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: audio.format.sample_rate,
                audio_channel_count: audio.format.channels,
                language_code: config.language.clone(),
                enable_automatic_punctuation: config.punctuate,
            },
            audio: RecognitionAudio {
                content: BASE64.encode(wav),
            },
        })
    }

    /// Join the best alternative of each result; no speech means NotUnderstood
    fn parse_response(response: RecognizeResponse) -> Result<TranscriptionResult> {
        let best: Vec<Alternative> = response
            .results
            .into_iter()
            .filter_map(|r| r.alternatives.into_iter().next())
            .collect();

        let text = best
            .iter()
            .map(|a| a.transcript.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            return Err(AppError::NotUnderstood);
        }

        let confidence = best.iter().filter_map(|a| a.confidence).reduce(f32::min);

        Ok(TranscriptionResult { text, confidence })
    }
}

#[async_trait]
impl TranscriptionServicePort for GoogleSpeechService {
    async fn transcribe(
        &self,
        audio: &AudioBuffer,
        config: &TranscriptionConfig,
    ) -> Result<TranscriptionResult> {
        if audio.is_empty() {
            return Err(AppError::NotUnderstood);
        }

        let request_body = Self::build_request(audio, config)?;

        log::info!(
            "Sending {:.1}s of audio to Google Speech-to-Text",
            audio.duration().as_secs_f32()
        );

        let response = self
            .client
            .post(format!("{}/speech:recognize", SPEECH_API_BASE))
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::SpeechService(format!("Recognize request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Speech-to-Text API error response: {}", error_text);
            return Err(AppError::SpeechService(format!(
                "Speech-to-Text API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: RecognizeResponse = response.json().await.map_err(|e| {
            AppError::SpeechService(format!("Failed to parse recognize response: {}", e))
        })?;

        let result = Self::parse_response(parsed)?;
        log::info!("Recognized {} characters of speech", result.text.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::audio::AudioFormat;

    #[test]
    fn test_parse_response_joins_results() {
        let response: RecognizeResponse = serde_json::from_str(
            r#"{"results":[
                {"alternatives":[{"transcript":"fix my","confidence":0.9},{"transcript":"fix me"}]},
                {"alternatives":[{"transcript":" loop ","confidence":0.8}]}
            ]}"#,
        )
        .unwrap();

        let result = GoogleSpeechService::parse_response(response).unwrap();
        assert_eq!(result.text, "fix my loop");
        assert_eq!(result.confidence, Some(0.8));
    }

    #[test]
    fn test_empty_response_is_not_understood() {
        let response: RecognizeResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            GoogleSpeechService::parse_response(response),
            Err(AppError::NotUnderstood)
        ));
    }

    #[test]
    fn test_request_shape() {
        let audio = AudioBuffer {
            samples: vec![0.0; 160],
            format: AudioFormat::default(),
        };
        let request =
            GoogleSpeechService::build_request(&audio, &TranscriptionConfig::default()).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["config"]["encoding"], "LINEAR16");
        assert_eq!(json["config"]["sampleRateHertz"], 16000);
        assert_eq!(json["config"]["languageCode"], "en-US");
        assert!(!json["audio"]["content"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_audio_short_circuits() {
        let service = GoogleSpeechService::new("key".to_string()).unwrap();
        let audio = AudioBuffer {
            samples: Vec::new(),
            format: AudioFormat::default(),
        };
        let result = service
            .transcribe(&audio, &TranscriptionConfig::default())
            .await;
        assert!(matches!(result, Err(AppError::NotUnderstood)));
    }
}
