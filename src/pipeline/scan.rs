use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

pub const NOTE_EXTENSION: &str = "md";

/// Lists note files at the top level of the notes directory, sorted by file
/// name so processing order is deterministic within a run. Subdirectories
/// (including imported/) are not recursed into, which is why already-archived
/// notes are excluded from subsequent runs.
pub fn discover_notes(dir: &Path) -> Result<Vec<PathBuf>> {
  let mut notes: Vec<PathBuf> = std::fs::read_dir(dir)?
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
    .map(|e| e.path())
    .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(NOTE_EXTENSION))
    .collect();
  notes.sort();

  info!("found {} note(s) in {}", notes.len(), dir.display());
  Ok(notes)
}
