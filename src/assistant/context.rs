//! Per-user session state
//!
//! Everything a conversation needs between turns lives here and is passed to
//! the orchestrator explicitly, so one process can host many sessions.

use crate::assistant::chat_session::ChatSession;
use crate::domain::{Language, Persona, Transcript, UploadedDocument};

/// Where a turn is in its pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TurnState {
    #[default]
    Idle,
    PromptAssembled,
    AwaitingReply,
    Replied,
    Failed,
}

/// Exclusive hold on a session's turn slot
///
/// The state goes back to `Idle` when the guard is dropped, including when a
/// turn future is dropped mid-send.
pub(super) struct TurnGuard<'a> {
    state: &'a mut TurnState,
}

impl<'a> TurnGuard<'a> {
    /// Claim the slot, or `None` while another turn holds it
    pub(super) fn begin(state: &'a mut TurnState) -> Option<Self> {
        if *state != TurnState::Idle {
            return None;
        }
        let mut guard = Self { state };
        guard.advance(TurnState::PromptAssembled);
        Some(guard)
    }

    pub(super) fn advance(&mut self, next: TurnState) {
        log::debug!("Turn state {:?} -> {:?}", self.state, next);
        *self.state = next;
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if matches!(
            *self.state,
            TurnState::PromptAssembled | TurnState::AwaitingReply
        ) {
            log::warn!("Turn abandoned while {:?}", self.state);
        }
        self.advance(TurnState::Idle);
    }
}

/// State of one user session
#[derive(Debug, Default)]
pub struct SessionContext {
    persona: Persona,
    language: Language,
    document: Option<UploadedDocument>,
    pub(super) transcript: Transcript,
    pub(super) chat: ChatSession,
    pub(super) state: TurnState,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn select_persona(&mut self, persona: Persona) {
        log::info!("Persona set to {}", persona);
        self.persona = persona;
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn select_language(&mut self, language: Language) {
        log::info!("Reply language set to {} ({})", language, language.code());
        self.language = language;
    }

    pub fn document(&self) -> Option<&UploadedDocument> {
        self.document.as_ref()
    }

    /// Replace the uploaded document
    pub fn set_document(&mut self, document: UploadedDocument) {
        self.document = Some(document);
    }

    pub fn clear_document(&mut self) {
        self.document = None;
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Whether the summarize action applies right now
    pub fn can_summarize(&self) -> bool {
        self.persona.can_summarize() && self.document.as_ref().is_some_and(|d| d.has_content())
    }
}
