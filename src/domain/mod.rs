/// Domain layer - core conversation models
///
/// These models are platform-agnostic and carry no service dependencies.
pub mod models;
pub mod personas;

pub use models::{
    ChatMessage, DocumentKind, ExportedTranscript, Language, Role, Transcript, UploadedDocument,
};
pub use personas::Persona;
