//! Chat model adapters
//!
//! Implementations of the ChatModelPort trait:
//! - Google (Gemini)

pub mod google;

pub use google::GoogleService;
