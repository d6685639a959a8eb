//! Task personas
//!
//! Each persona carries the fixed instruction text that opens every prompt
//! sent while it is active, plus an optional suggestion shown to the user.

use serde::{Deserialize, Serialize};

/// Task preset steering the assistant's behavior
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    #[default]
    GeneralAdvice,
    CodingHelp,
    EmotionalSupport,
    ResumeReview,
    MathProblemSolver,
    TextSummarizer,
    AiMlTutor,
}

impl Persona {
    /// All personas in selector order
    pub const ALL: [Persona; 7] = [
        Persona::GeneralAdvice,
        Persona::CodingHelp,
        Persona::EmotionalSupport,
        Persona::ResumeReview,
        Persona::MathProblemSolver,
        Persona::TextSummarizer,
        Persona::AiMlTutor,
    ];

    /// Name shown in the persona selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::GeneralAdvice => "General Advice",
            Persona::CodingHelp => "Coding Help",
            Persona::EmotionalSupport => "Emotional Support",
            Persona::ResumeReview => "Resume Review",
            Persona::MathProblemSolver => "Math Problem Solver",
            Persona::TextSummarizer => "Text Summarizer",
            Persona::AiMlTutor => "AI/ML Tutor",
        }
    }

    /// Instruction text that prefixes every prompt for this persona
    pub fn instructions(&self) -> &'static str {
        match self {
            Persona::GeneralAdvice => "You're a helpful assistant. Answer clearly and usefully.",
            Persona::CodingHelp => {
                "You're an expert software developer. Help with code, errors, or logic."
            }
            Persona::EmotionalSupport => {
                "You're a compassionate assistant. Provide kind and supportive advice."
            }
            Persona::ResumeReview => "You're a career coach. Review and improve resume content.",
            Persona::MathProblemSolver => "You're a math tutor. Solve step-by-step with reasoning.",
            Persona::TextSummarizer => {
                "You're a smart summarizer. Condense the following content clearly."
            }
            Persona::AiMlTutor => {
                "You're a skilled ML/AI tutor. Explain concepts clearly and practically."
            }
        }
    }

    /// Example question to show when the persona is selected
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Persona::ResumeReview => Some("💡 Try: *How can I improve my experience section?*"),
            Persona::CodingHelp => Some("💡 Try: *Why does my Python loop not work?*"),
            Persona::AiMlTutor => Some("💡 Try: *Explain overfitting vs underfitting.*"),
            Persona::MathProblemSolver => Some("💡 Try: *Solve x^2 + 3x + 2 = 0 step-by-step.*"),
            _ => None,
        }
    }

    /// Whether uploaded document content is attached to this persona's prompts
    pub fn consumes_documents(&self) -> bool {
        matches!(self, Persona::ResumeReview | Persona::TextSummarizer)
    }

    /// Whether the summarize-uploaded-file action is offered
    pub fn can_summarize(&self) -> bool {
        matches!(self, Persona::TextSummarizer)
    }

    /// Look up a persona by its display name (case-insensitive)
    pub fn from_display_name(name: &str) -> Option<Persona> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.display_name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_persona() {
        assert_eq!(Persona::default(), Persona::GeneralAdvice);
    }

    #[test]
    fn test_every_persona_has_instructions() {
        for persona in Persona::ALL {
            assert!(!persona.instructions().is_empty());
            assert!(persona.instructions().starts_with("You're"));
        }
    }

    #[test]
    fn test_document_consumers() {
        let consumers: Vec<_> = Persona::ALL
            .into_iter()
            .filter(|p| p.consumes_documents())
            .collect();
        assert_eq!(consumers, vec![Persona::ResumeReview, Persona::TextSummarizer]);
        assert!(Persona::TextSummarizer.can_summarize());
        assert!(!Persona::ResumeReview.can_summarize());
    }

    #[test]
    fn test_suggestions() {
        assert!(Persona::CodingHelp.suggestion().is_some());
        assert!(Persona::TextSummarizer.suggestion().is_none());
        assert!(Persona::GeneralAdvice.suggestion().is_none());
    }

    #[test]
    fn test_from_display_name() {
        assert_eq!(
            Persona::from_display_name("ai/ml tutor"),
            Some(Persona::AiMlTutor)
        );
        assert_eq!(
            Persona::from_display_name(" Text Summarizer "),
            Some(Persona::TextSummarizer)
        );
        assert_eq!(Persona::from_display_name("Astrology"), None);
    }
}
