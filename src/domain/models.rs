/// Domain models for GenieTalk
///
/// These models represent the conversation state of a single user session.
use crate::error::{AppError, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One role-tagged transcript entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered log of the session's conversation
///
/// Entries are only ever appended as (user, assistant) pairs, so the length
/// is always even and every assistant entry follows its user entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one completed turn
    pub fn append_turn(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.messages.push(ChatMessage::user(user));
        self.messages.push(ChatMessage::assistant(assistant));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Render as repeated `ROLE:\n<message>\n\n` blocks
    pub fn to_plain_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}:\n{}\n\n", m.role.to_string().to_uppercase(), m.content))
            .collect()
    }

    /// Build the downloadable export for the given moment
    pub fn export_at(&self, at: DateTime<Local>) -> ExportedTranscript {
        ExportedTranscript {
            file_name: format!("chat_{}.txt", at.format("%Y%m%d_%H%M%S")),
            content: self.to_plain_text(),
        }
    }
}

/// Plain-text transcript export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTranscript {
    pub file_name: String,
    pub content: String,
}

/// Reply language; English means no translation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Spanish,
    French,
    German,
    Tamil,
    Bengali,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::Hindi,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Tamil,
        Language::Bengali,
    ];

    /// ISO 639-1 code sent to the translation service
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Tamil => "ta",
            Language::Bengali => "bn",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Tamil => "Tamil",
            Language::Bengali => "Bengali",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Language::English
    }

    /// Look up by display name or code (case-insensitive)
    pub fn parse(value: &str) -> Option<Language> {
        let value = value.trim();
        Self::ALL.into_iter().find(|l| {
            l.display_name().eq_ignore_ascii_case(value) || l.code().eq_ignore_ascii_case(value)
        })
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Kind of an uploaded file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    PlainText,
    Pdf,
}

impl DocumentKind {
    /// Accept a file by extension; anything but `.txt` and `.pdf` is rejected
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("txt") => Ok(DocumentKind::PlainText),
            Some("pdf") => Ok(DocumentKind::Pdf),
            _ => Err(AppError::UnsupportedDocument(path.display().to_string())),
        }
    }
}

/// Text of a file uploaded for the session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedDocument {
    pub file_name: String,
    pub kind: DocumentKind,
    pub text: String,
}

impl UploadedDocument {
    pub fn new(file_name: impl Into<String>, kind: DocumentKind, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
            text: text.into(),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.text.is_empty()
    }
}
