//! Writing exported transcripts to disk

use crate::domain::ExportedTranscript;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Write the export into `dir`, creating the directory if needed
///
/// Returns the path of the written file.
pub fn write_export(export: &ExportedTranscript, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&export.file_name);
    std::fs::write(&path, export.content.as_bytes())?;
    log::info!("Exported transcript to {}", path.display());
    Ok(path)
}
