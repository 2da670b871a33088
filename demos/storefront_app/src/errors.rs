// demos/storefront_app/src/errors.rs

use storefront::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Usage: {0}")]
  Usage(String),

  #[error("Not allowed: {0}")]
  Denied(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Storefront Error: {source}")]
  Store {
    #[from]
    source: StoreError,
  },

  #[error("Invalid product JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("I/O Error: {0}")]
  Io(#[from] std::io::Error),
}

impl AppError {
  /// Errors that end the shell rather than just the current command.
  pub fn is_fatal(&self) -> bool {
    matches!(self, AppError::Config(_) | AppError::Io(_))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
