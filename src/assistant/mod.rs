/// Conversation core
///
/// Session state, prompt assembly, the chat session and the turn pipeline
/// that ties the ports together.
pub mod chat_session;
pub mod context;
pub mod orchestrator;
pub mod prompt;
pub mod speech_input;
pub mod speech_output;

pub use chat_session::ChatSession;
pub use context::{SessionContext, TurnState};
pub use orchestrator::{Notice, Orchestrator, Severity, TurnOrigin, TurnOutcome, TurnReply};
pub use speech_input::{ListenOutcome, SpeechInput};
pub use speech_output::{MutedSpeechOutput, SpeechOutput};
