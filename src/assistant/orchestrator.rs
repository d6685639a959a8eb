//! Turn pipeline
//!
//! A turn assembles a prompt, sends it through the chat session, optionally
//! translates the reply, then records the exchange and speaks it. Turn-fatal
//! errors end as a [`TurnOutcome::Failed`] and leave the transcript and chat
//! history untouched.

use crate::assistant::context::{SessionContext, TurnGuard, TurnState};
use crate::assistant::prompt::{summarize_prompt, user_prompt, SUMMARIZE_LABEL};
use crate::assistant::speech_input::{ListenOutcome, SpeechInput};
use crate::domain::{ExportedTranscript, Language};
use crate::ports::llm::{ChatModelPort, LlmConfig};
use crate::ports::synthesis::SpeechOutputPort;
use crate::ports::translation::TranslationPort;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;

pub const TRANSLATION_FAILED: &str = "⚠️ Translation failed. Showing original.";
pub const TURN_FAILED: &str = "⚠️ Something went wrong. Please try again.";
pub const SUMMARIZE_FAILED: &str = "⚠️ Could not summarize file.";
pub const VOICE_NOT_UNDERSTOOD: &str = "🤔 Couldn't understand your voice.";
pub const VOICE_FAILED: &str = "⚠️ Voice recognition failed.";

/// Default push-to-talk capture limit
pub const DEFAULT_LISTEN_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Message for the user about something that went wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    /// Underlying failure, for an expandable details view
    pub detail: Option<String>,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            detail: None,
        }
    }

    pub fn error(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            detail,
        }
    }
}

/// Source of a turn's input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOrigin {
    Typed,
    Voice,
    Summarize,
}

/// A completed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub origin: TurnOrigin,
    /// User side as recorded in the transcript
    pub user_entry: String,
    /// Assistant side as displayed, spoken and recorded
    pub reply: String,
    pub warnings: Vec<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Replied(TurnReply),
    /// Nothing was sent; the session is unchanged
    NoInput(Notice),
    /// The turn aborted; the session is unchanged
    Failed(Notice),
}

/// Runs turns against a [`SessionContext`]
pub struct Orchestrator {
    chat_model: Arc<dyn ChatModelPort>,
    translator: Arc<dyn TranslationPort>,
    speech_output: Arc<dyn SpeechOutputPort>,
    speech_input: Option<SpeechInput>,
    llm_config: LlmConfig,
    listen_timeout: Duration,
}

impl Orchestrator {
    pub fn new(
        chat_model: Arc<dyn ChatModelPort>,
        translator: Arc<dyn TranslationPort>,
        speech_output: Arc<dyn SpeechOutputPort>,
        llm_config: LlmConfig,
    ) -> Self {
        Self {
            chat_model,
            translator,
            speech_output,
            speech_input: None,
            llm_config,
            listen_timeout: DEFAULT_LISTEN_TIMEOUT,
        }
    }

    /// Enable push-to-talk input
    pub fn with_speech_input(mut self, speech_input: SpeechInput, listen_timeout: Duration) -> Self {
        self.speech_input = Some(speech_input);
        self.listen_timeout = listen_timeout;
        self
    }

    pub fn has_speech_input(&self) -> bool {
        self.speech_input.is_some()
    }

    /// Handle typed text
    pub async fn submit_text(&self, ctx: &mut SessionContext, text: &str) -> TurnOutcome {
        if text.trim().is_empty() {
            return TurnOutcome::NoInput(Notice::warning("Nothing to send."));
        }

        let prompt = user_prompt(ctx.persona(), text, ctx.document());
        self.run_turn(ctx, TurnOrigin::Typed, text.to_string(), prompt)
            .await
    }

    /// Listen on the microphone and handle what was said
    pub async fn submit_voice(&self, ctx: &mut SessionContext) -> TurnOutcome {
        let Some(speech_input) = &self.speech_input else {
            return TurnOutcome::NoInput(Notice::error(
                VOICE_FAILED,
                Some("Voice input is not available on this system".to_string()),
            ));
        };

        if ctx.state() != TurnState::Idle {
            return Self::busy();
        }

        let heard = match speech_input.listen(self.listen_timeout).await {
            ListenOutcome::Heard(text) => text,
            ListenOutcome::NotUnderstood => {
                return TurnOutcome::NoInput(Notice::warning(VOICE_NOT_UNDERSTOOD))
            }
            ListenOutcome::ServiceUnavailable(detail) => {
                return TurnOutcome::NoInput(Notice::error(VOICE_FAILED, Some(detail)))
            }
        };

        let prompt = user_prompt(ctx.persona(), &heard, ctx.document());
        self.run_turn(ctx, TurnOrigin::Voice, heard, prompt).await
    }

    /// Ask for a summary of the uploaded document
    pub async fn summarize_document(&self, ctx: &mut SessionContext) -> TurnOutcome {
        let document = match ctx.document() {
            Some(document) if ctx.can_summarize() => document,
            _ => {
                return TurnOutcome::NoInput(Notice::warning(
                    "Select the Text Summarizer task and upload a file to summarize it.",
                ))
            }
        };

        let prompt = summarize_prompt(ctx.persona(), document);
        self.run_turn(ctx, TurnOrigin::Summarize, SUMMARIZE_LABEL.to_string(), prompt)
            .await
    }

    /// Clear the transcript and start a new chat session together
    pub fn reset(&self, ctx: &mut SessionContext) {
        ctx.transcript.clear();
        ctx.chat.reset();
        ctx.state = TurnState::Idle;
        log::info!("Conversation cleared");
    }

    /// Plain-text export of the transcript, named for the current time
    pub fn export(&self, ctx: &SessionContext) -> ExportedTranscript {
        ctx.transcript().export_at(Local::now())
    }

    fn busy() -> TurnOutcome {
        TurnOutcome::Failed(Notice::error(
            TURN_FAILED,
            Some(crate::error::AppError::TurnInProgress.to_string()),
        ))
    }

    async fn run_turn(
        &self,
        ctx: &mut SessionContext,
        origin: TurnOrigin,
        user_entry: String,
        prompt: String,
    ) -> TurnOutcome {
        let persona = ctx.persona();
        let language = ctx.language();
        let Some(mut turn) = TurnGuard::begin(&mut ctx.state) else {
            return Self::busy();
        };

        log::info!(
            "{:?} turn with persona {} ({} prompt characters)",
            origin,
            persona,
            prompt.len()
        );

        turn.advance(TurnState::AwaitingReply);
        let sent = ctx
            .chat
            .send(self.chat_model.as_ref(), &prompt, &self.llm_config)
            .await;

        let raw_reply = match sent {
            Ok(reply) => reply,
            Err(e) => {
                log::error!("{:?} turn failed: {}", origin, e);
                turn.advance(TurnState::Failed);

                let message = match origin {
                    TurnOrigin::Summarize => SUMMARIZE_FAILED,
                    TurnOrigin::Typed | TurnOrigin::Voice => TURN_FAILED,
                };
                return TurnOutcome::Failed(Notice::error(message, Some(e.to_string())));
            }
        };

        let mut warnings = Vec::new();
        let reply = self
            .localize(raw_reply, language, &mut warnings)
            .await;

        ctx.transcript.append_turn(user_entry.clone(), reply.clone());
        self.speech_output.speak(&reply);

        turn.advance(TurnState::Replied);
        drop(turn);

        TurnOutcome::Replied(TurnReply {
            origin,
            user_entry,
            reply,
            warnings,
        })
    }

    /// Translate the reply when a non-default language is selected
    async fn localize(&self, reply: String, language: Language, warnings: &mut Vec<Notice>) -> String {
        if language.is_default() {
            return reply;
        }

        match self.translator.translate(&reply, language).await {
            Ok(translated) => format!("{} \n\n🌐 (Original in English):\n{}", translated, reply),
            Err(e) => {
                log::warn!("Translation to {} failed: {}", language.code(), e);
                warnings.push(Notice::warning(TRANSLATION_FAILED));
                reply
            }
        }
    }
}
