use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::github::client::GitHubClient;
use crate::note::Note;
use crate::pipeline::archive;

#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
  pub imported: usize,
  pub skipped: usize,
  pub failed: usize,
}

impl std::fmt::Display for RunSummary {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} imported, {} skipped, {} failed",
      self.imported, self.skipped, self.failed
    )
  }
}

enum NoteOutcome {
  Imported,
  Skipped,
}

/// Processes every discovered note in order. Per-note failures are logged
/// with the offending file and never abort the run.
pub async fn run(
  config: &Config,
  client: &GitHubClient,
  project_id: &str,
  notes: &[PathBuf],
) -> RunSummary {
  let mut summary = RunSummary::default();

  for path in notes {
    match process_note(config, client, project_id, path).await {
      Ok(NoteOutcome::Imported) => summary.imported += 1,
      Ok(NoteOutcome::Skipped) => summary.skipped += 1,
      Err(e) => {
        warn!("failed to import {}: {e}", path.display());
        summary.failed += 1;
      }
    }
  }

  summary
}

async fn process_note(
  config: &Config,
  client: &GitHubClient,
  project_id: &str,
  path: &Path,
) -> Result<NoteOutcome> {
  let content = std::fs::read_to_string(path)?;

  let Some(note) = Note::parse(&content) else {
    warn!("skipping {} (not enough content)", path.display());
    return Ok(NoteOutcome::Skipped);
  };

  // A creation failure propagates: the file stays in the source directory
  // for a future run and no index entry is written.
  let issue = client.create_issue(&note).await?;

  // Linkage is best-effort: the issue already exists remotely, so a failure
  // here must not block archival.
  match client.add_to_project(project_id, &issue.node_id).await {
    Ok(_) => info!("issue added to project"),
    Err(e) => warn!("failed to add issue to project: {e}"),
  }

  finalize_note(config, path, &note.title, &issue.html_url)?;
  Ok(NoteOutcome::Imported)
}

/// Archives a note whose issue was created: move first (a failed move leaves
/// the original in place for a retry), then annotate, then index. Annotation
/// and index failures after a successful move are logged, not fatal.
fn finalize_note(config: &Config, path: &Path, title: &str, issue_url: &str) -> Result<()> {
  let archived = archive::move_to_imported(path, &config.imported_dir())?;

  if let Err(e) = archive::append_marker(&archived, issue_url) {
    warn!("failed to annotate {}: {e}", archived.display());
  }
  if let Err(e) = archive::append_index(&config.index_file, title, issue_url) {
    warn!("failed to index {title}: {e}");
  }

  Ok(())
}

/// Parses notes and reports what would be imported, with no network calls
/// and no filesystem side effects.
pub fn dry_run(notes: &[PathBuf]) -> Result<()> {
  for path in notes {
    let content = std::fs::read_to_string(path)?;

    match Note::parse(&content) {
      Some(note) => {
        println!("--- {} ---", path.display());
        println!("Title:     {}", note.title);
        println!("Labels:    {}", note.labels.join(", "));
        println!("Assignees: {}", note.assignees.join(", "));
        println!();
      }
      None => println!("--- {} --- skipped (not enough content)", path.display()),
    }
  }

  Ok(())
}
