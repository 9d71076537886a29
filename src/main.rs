mod config;
mod error;
mod github;
mod note;
mod pipeline;

use clap::Parser;
use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::github::client::GitHubClient;

#[derive(Parser)]
#[command(
  name = "note-import",
  about = "Import markdown notes as GitHub issues on an organization project board"
)]
struct Cli {
  /// Parse notes and report what would be imported, without side effects
  #[arg(long)]
  dry_run: bool,
}

#[tokio::main]
async fn main() {
  dotenv::dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  let cli = Cli::parse();

  if let Err(e) = run(cli).await {
    error!("{e}");
    std::process::exit(1);
  }
}

async fn run(cli: Cli) -> Result<()> {
  let config = Config::from_env()?;

  let notes = pipeline::scan::discover_notes(&config.notes_dir)?;

  if cli.dry_run {
    return pipeline::import::dry_run(&notes);
  }

  config.ensure_workspace()?;

  let client = GitHubClient::new(&config)?;

  info!("resolving organization and project ids...");
  let org_id = client.resolve_organization(&config.org).await?;
  info!("organization id: {org_id}");

  let project_id = client
    .resolve_project(&config.org, config.project_number)
    .await?;
  info!("project id: {project_id}");

  info!("starting issue import...");
  let summary = pipeline::import::run(&config, &client, &project_id, &notes).await;
  info!("import complete: {summary}");

  Ok(())
}
