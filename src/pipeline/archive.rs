use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

pub const IMPORT_MARKER: &str = "- [x] Imported to GitHub Issue:";

/// Moves a processed note into the imported/ directory under its original
/// name. The move happens before any other side effect: if it fails, the
/// original stays in the source directory and a later run can retry.
pub fn move_to_imported(note_path: &Path, imported_dir: &Path) -> Result<PathBuf> {
  let file_name = note_path.file_name().ok_or_else(|| {
    std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      format!("note has no file name: {}", note_path.display()),
    )
  })?;
  let archived = imported_dir.join(file_name);

  std::fs::rename(note_path, &archived)?;
  info!("moved {} to {}", note_path.display(), archived.display());

  Ok(archived)
}

/// Appends the completion marker with the issue URL to an archived note.
pub fn append_marker(archived: &Path, issue_url: &str) -> Result<()> {
  let mut file = std::fs::OpenOptions::new().append(true).open(archived)?;
  write!(file, "\n\n{IMPORT_MARKER} {issue_url}\n")?;
  Ok(())
}

/// Appends one markdown link line to the index file, mapping the issue title
/// to its URL. The file is opened per note, not held open across notes.
pub fn append_index(index_file: &Path, title: &str, issue_url: &str) -> Result<()> {
  let mut index = std::fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(index_file)?;
  writeln!(index, "- [{title}]({issue_url})")?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn move_to_imported_relocates_under_original_name() {
    let dir = tempfile::tempdir().unwrap();
    let imported = dir.path().join("imported");
    std::fs::create_dir(&imported).unwrap();

    let note = dir.path().join("fix-bug.md");
    std::fs::write(&note, "# Fix bug\nbody\n").unwrap();

    let archived = move_to_imported(&note, &imported).unwrap();

    assert_eq!(archived, imported.join("fix-bug.md"));
    assert!(!note.exists());
    assert_eq!(
      std::fs::read_to_string(&archived).unwrap(),
      "# Fix bug\nbody\n"
    );
  }

  #[test]
  fn failed_move_leaves_the_source_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let note = dir.path().join("fix-bug.md");
    std::fs::write(&note, "# Fix bug\nbody\n").unwrap();

    let missing = dir.path().join("no-such-dir");
    assert!(move_to_imported(&note, &missing).is_err());
    assert!(note.exists());
  }

  #[test]
  fn append_marker_adds_a_checkbox_line_with_the_url() {
    let dir = tempfile::tempdir().unwrap();
    let archived = dir.path().join("fix-bug.md");
    std::fs::write(&archived, "# Fix bug\nbody\n").unwrap();

    append_marker(&archived, "https://github.com/acme/widgets/issues/42").unwrap();

    let content = std::fs::read_to_string(&archived).unwrap();
    assert!(content.starts_with("# Fix bug\nbody\n"));
    assert!(content
      .ends_with("\n\n- [x] Imported to GitHub Issue: https://github.com/acme/widgets/issues/42\n"));
  }

  #[test]
  fn append_index_appends_one_link_line_per_issue() {
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.md");
    std::fs::write(&index, "# Created Issues\n\n").unwrap();

    append_index(&index, "Fix bug", "https://github.com/acme/widgets/issues/42").unwrap();
    append_index(&index, "Add docs", "https://github.com/acme/widgets/issues/43").unwrap();

    let content = std::fs::read_to_string(&index).unwrap();
    assert_eq!(
      content,
      "# Created Issues\n\n\
       - [Fix bug](https://github.com/acme/widgets/issues/42)\n\
       - [Add docs](https://github.com/acme/widgets/issues/43)\n"
    );
  }
}
