#[derive(Debug, thiserror::Error)]
pub enum ImportError {
  #[error("config error: {0}")]
  Config(String),

  #[error("request error: {0}")]
  Request(String),

  #[error("issue creation failed ({status}): {body}")]
  Creation { status: u16, body: String },

  #[error("not found: {0}")]
  NotFound(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
