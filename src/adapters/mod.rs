/// Adapters - platform-specific implementations
///
/// These modules implement the port traits for specific platforms and services.
pub mod audio;
pub mod document;
pub mod services;

pub use document::DocumentLoader;
