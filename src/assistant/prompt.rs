//! Prompt assembly
//!
//! Every prompt opens with the active persona's instructions. Document text
//! rides along only for personas that work on uploaded files.

use crate::domain::{Persona, UploadedDocument};

/// Transcript label for the user side of a summarize turn
pub const SUMMARIZE_LABEL: &str = "[Summarize File]";

/// Prompt for typed or spoken input
pub fn user_prompt(persona: Persona, input: &str, document: Option<&UploadedDocument>) -> String {
    let mut prompt = format!("{}\n\nUser Input:\n{}", persona.instructions(), input);

    if let Some(document) = document.filter(|d| persona.consumes_documents() && d.has_content()) {
        prompt.push_str("\n\nFile Content:\n");
        prompt.push_str(&document.text);
    }

    prompt
}

/// Prompt asking for a summary of the uploaded document
pub fn summarize_prompt(persona: Persona, document: &UploadedDocument) -> String {
    format!("{}\n\n{}", persona.instructions(), document.text)
}
