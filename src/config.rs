use std::path::PathBuf;

use crate::error::{ImportError, Result};

/// Environment variable names, defined once.
pub mod env_vars {
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
    pub const ORG: &str = "ORG";
    pub const REPO: &str = "REPO";
    pub const PROJECT_NUMBER: &str = "PROJECT_NUMBER";
    pub const NOTES_DIR: &str = "NOTES_DIR";
    pub const INDEX_FILE: &str = "INDEX_FILE";
}

/// Subdirectory of the notes dir that processed notes are moved into.
pub const IMPORTED_DIR: &str = "imported";

/// Header written when the index file is first created.
pub const INDEX_HEADER: &str = "# Created Issues\n\n";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub org: String,
    pub repo: String,
    pub project_number: u32,
    pub notes_dir: PathBuf,
    pub index_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let project_number = required(env_vars::PROJECT_NUMBER)?;
        let project_number = project_number.parse().map_err(|_| {
            ImportError::Config(format!(
                "{} must be a number, got {project_number:?}",
                env_vars::PROJECT_NUMBER
            ))
        })?;

        let config = Self {
            github_token: required(env_vars::GITHUB_TOKEN)?,
            org: required(env_vars::ORG)?,
            repo: required(env_vars::REPO)?,
            project_number,
            notes_dir: PathBuf::from(required(env_vars::NOTES_DIR)?),
            index_file: PathBuf::from(required(env_vars::INDEX_FILE)?),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.notes_dir.is_dir() {
            return Err(ImportError::Config(format!(
                "notes dir does not exist: {}",
                self.notes_dir.display()
            )));
        }
        Ok(())
    }

    pub fn imported_dir(&self) -> PathBuf {
        self.notes_dir.join(IMPORTED_DIR)
    }

    /// Creates the imported/ subdirectory and the index file (with its
    /// header) if they do not exist. Never truncates an existing index.
    pub fn ensure_workspace(&self) -> Result<()> {
        std::fs::create_dir_all(self.imported_dir())?;
        if !self.index_file.exists() {
            std::fs::write(&self.index_file, INDEX_HEADER)?;
        }
        Ok(())
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| ImportError::Config(format!("{name} is not set")))
}
