// storefront/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  /// The persistence backend failed. Fatal for the operation that hit it.
  #[error("Catalog backend failed during {operation}. Source: {source}")]
  Backend {
    operation: &'static str,
    #[source]
    source: AnyhowError,
  },

  #[error("Catalog could not be encoded: {0}")]
  Encode(#[from] serde_json::Error),

  /// The highest stored id is `u64::MAX`, so no new id can follow it.
  #[error("No product id is left after {0}")]
  IdsExhausted(u64),

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("A size must be selected before buying")]
  SizeNotSelected,

  #[error("Cannot check out an empty cart")]
  EmptyCart,

  #[error("A checkout is already in progress")]
  CheckoutInProgress,

  #[error("Checkout was cancelled before it completed")]
  CheckoutCancelled,

  #[error("Payment simulation failed: {0}")]
  Payment(String),

  #[error("Internal storefront error: {0}")]
  Internal(String),
}

impl StoreError {
  pub(crate) fn backend(operation: &'static str, source: AnyhowError) -> Self {
    StoreError::Backend { operation, source }
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
