//! Conversation memory held for the remote chat model

use crate::domain::ChatMessage;
use crate::error::Result;
use crate::ports::llm::{ChatModelPort, LlmConfig};
use uuid::Uuid;

/// One conversation with the chat model
///
/// The history is what the provider sees on every call. It only grows after a
/// successful exchange, so a failed send leaves it exactly as it was.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    /// Fresh session with empty history
    pub fn start() -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            history: Vec::new(),
        };
        log::debug!("Started chat session {}", session.id);
        session
    }

    /// Send one prompt and record the exchange on success
    pub async fn send(
        &mut self,
        model: &dyn ChatModelPort,
        prompt: &str,
        config: &LlmConfig,
    ) -> Result<String> {
        let reply = model.generate(&self.history, prompt, config).await?;

        self.history.push(ChatMessage::user(prompt));
        self.history.push(ChatMessage::assistant(reply.clone()));
        Ok(reply)
    }

    /// Discard this session's memory and replace it with a fresh one
    pub fn reset(&mut self) {
        let previous = self.id;
        *self = Self::start();
        log::debug!("Replaced chat session {} with {}", previous, self.id);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::ports::mocks::MockChatModel;

    #[tokio::test]
    async fn test_send_replays_history() {
        let model = MockChatModel::new();
        model.push_reply("first answer");
        model.push_reply("second answer");

        let mut session = ChatSession::start();
        let config = LlmConfig::default();

        assert_eq!(
            session.send(&model, "first", &config).await.unwrap(),
            "first answer"
        );
        assert_eq!(
            session.send(&model, "second", &config).await.unwrap(),
            "second answer"
        );

        let calls = model.calls();
        assert!(calls[0].history.is_empty());
        assert_eq!(calls[1].history.len(), 2);
        assert_eq!(calls[1].history[0].content, "first");
        assert_eq!(calls[1].history[1].role, Role::Assistant);
        assert_eq!(session.history().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_send_keeps_history() {
        let model = MockChatModel::new();
        model.push_reply("ok");
        model.push_failure("network down");

        let mut session = ChatSession::start();
        let config = LlmConfig::default();
        session.send(&model, "hello", &config).await.unwrap();

        let before = session.history().to_vec();
        assert!(session.send(&model, "again", &config).await.is_err());
        assert_eq!(session.history(), before.as_slice());
    }

    #[tokio::test]
    async fn test_reset_gives_fresh_handle() {
        let model = MockChatModel::new();
        let mut session = ChatSession::start();
        session
            .send(&model, "hello", &LlmConfig::default())
            .await
            .unwrap();

        let old_id = session.id();
        session.reset();
        assert_ne!(session.id(), old_id);
        assert!(session.history().is_empty());
    }
}
