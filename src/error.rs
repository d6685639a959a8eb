/// Error types for GenieTalk
///
/// Uses thiserror for ergonomic error handling with proper Display implementations.
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM service error: {0}")]
    Llm(String),

    #[error("Translation service error: {0}")]
    Translation(String),

    /// Audio was captured but the recognizer could not make sense of it
    #[error("Speech was not understood")]
    NotUnderstood,

    #[error("Speech service error: {0}")]
    SpeechService(String),

    #[error("Audio capture error: {0}")]
    AudioCapture(String),

    #[error("Audio playback error: {0}")]
    AudioPlayback(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Unsupported document type: {0}")]
    UnsupportedDocument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("A turn is already in progress")]
    TurnInProgress,
}

impl AppError {
    /// Whether the failure is worth a single retry against a remote service
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
