/// Utility modules
pub mod audio_file;
pub mod export;
