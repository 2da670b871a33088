// demos/storefront_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use storefront::catalog::DEFAULT_RECORD_NAME;
use storefront::CheckoutTimings;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub data_dir: PathBuf,
  pub record_name: String,
  pub processing_ms: u64,
  pub success_ms: u64,
  /// Logging in under this name grants the admin view.
  pub admin_name: Option<String>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());
    let get_millis = |var_name: &str, default: u64| -> Result<u64> {
      match get_env(var_name) {
        Some(raw) => raw
          .trim()
          .parse::<u64>()
          .map_err(|e| AppError::Config(format!("Invalid {}: {}", var_name, e))),
        None => Ok(default),
      }
    };

    let defaults = CheckoutTimings::default();
    let data_dir = PathBuf::from(get_env("STOREFRONT_DATA_DIR").unwrap_or_else(|| "./storefront-data".to_string()));
    let record_name = get_env("STOREFRONT_RECORD_NAME").unwrap_or_else(|| DEFAULT_RECORD_NAME.to_string());
    if record_name.contains(['/', '\\']) {
      return Err(AppError::Config(format!(
        "STOREFRONT_RECORD_NAME must be a plain name, got '{}'",
        record_name
      )));
    }
    let processing_ms = get_millis("STOREFRONT_PROCESSING_MS", defaults.processing.as_millis() as u64)?;
    let success_ms = get_millis("STOREFRONT_SUCCESS_MS", defaults.success.as_millis() as u64)?;
    let admin_name = get_env("STOREFRONT_ADMIN_NAME");

    tracing::info!("Application configuration loaded successfully.");
    tracing::debug!(data_dir = %data_dir.display(), %record_name, processing_ms, success_ms, "Loaded config details");

    Ok(Self {
      data_dir,
      record_name,
      processing_ms,
      success_ms,
      admin_name,
    })
  }

  pub fn checkout_timings(&self) -> CheckoutTimings {
    CheckoutTimings::from_millis(self.processing_ms, self.success_ms)
  }

  pub fn is_admin_name(&self, name: &str) -> bool {
    self.admin_name.as_deref().is_some_and(|admin| admin == name)
  }
}
