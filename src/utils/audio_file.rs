//! WAV encoding utilities for captured and synthesized audio
//!
//! Provides in-memory WAV conversion using the hound crate, plus small
//! measurements used by the capture loop.

use crate::error::{AppError, Result};
use crate::ports::audio::{AudioBuffer, AudioFormat};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Cursor, Seek, Write};

/// Convert a normalized sample to 16-bit PCM
pub fn f32_to_i16(sample: f32) -> i16 {
    // Clamp to [-1.0, 1.0]; 1.0 * 32768.0 saturates to i16::MAX on cast
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 32768.0) as i16
}

/// Write an audio buffer as 16-bit PCM WAV into any seekable writer
///
/// # Returns
/// The number of samples written
pub fn write_wav<W: Write + Seek>(buffer: &AudioBuffer, writer: W) -> Result<usize> {
    let spec = WavSpec {
        channels: buffer.format.channels,
        sample_rate: buffer.format.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut wav = WavWriter::new(writer, spec)
        .map_err(|e| AppError::AudioCapture(format!("Failed to create WAV writer: {}", e)))?;

    let mut samples_written = 0;
    for &sample in &buffer.samples {
        wav.write_sample(f32_to_i16(sample))
            .map_err(|e| AppError::AudioCapture(format!("Failed to write sample: {}", e)))?;
        samples_written += 1;
    }

    wav.finalize()
        .map_err(|e| AppError::AudioCapture(format!("Failed to finalize WAV: {}", e)))?;

    Ok(samples_written)
}

/// Encode an audio buffer as an in-memory WAV file
pub fn encode_wav(buffer: &AudioBuffer) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_wav(buffer, &mut cursor)?;
    Ok(cursor.into_inner())
}

/// Decode a 16-bit PCM WAV file held in memory
pub fn decode_wav(bytes: &[u8]) -> Result<AudioBuffer> {
    let reader = WavReader::new(Cursor::new(bytes))
        .map_err(|e| AppError::SpeechService(format!("Invalid WAV data: {}", e)))?;

    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(AppError::SpeechService(format!(
            "Unsupported WAV encoding: {:?} {} bits",
            spec.sample_format, spec.bits_per_sample
        )));
    }

    let samples = reader
        .into_samples::<i16>()
        .map(|s| s.map(|v| v as f32 / 32768.0))
        .collect::<std::result::Result<Vec<f32>, _>>()
        .map_err(|e| AppError::SpeechService(format!("Failed to read WAV samples: {}", e)))?;

    Ok(AudioBuffer {
        samples,
        format: AudioFormat {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
        },
    })
}

/// Root-mean-square level of a block of samples
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Get a formatted string representation of audio buffer info
pub fn format_audio_info(buffer: &AudioBuffer) -> String {
    format!(
        "{:.2}s @ {}Hz, {} channel(s), {} samples",
        buffer.duration().as_secs_f64(),
        buffer.format.sample_rate,
        buffer.format.channels,
        buffer.samples.len()
    )
}
