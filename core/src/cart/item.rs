// storefront/src/cart/item.rs

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// One cart line: a snapshot of the product taken at first add, the chosen
/// size and how many were added.
///
/// The snapshot is a copy. Later edits or deletes of the catalog product do
/// not reach it, so the price is locked at first add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
  #[serde(flatten)]
  pub product: Product,
  /// Always at least 1.
  pub quantity: u32,
  #[serde(rename = "selectedSize")]
  pub selected_size: String,
}

impl CartItem {
  pub(crate) fn new(product: &Product, size: String) -> Self {
    Self {
      product: product.clone(),
      quantity: 1,
      selected_size: size,
    }
  }

  /// Line identity: (product id, size).
  pub fn is_line(&self, product_id: u64, size: &str) -> bool {
    self.product.id == product_id && self.selected_size == size
  }

  /// `price * quantity`, capped at `u64::MAX`.
  pub fn line_total(&self) -> u64 {
    self.product.price.saturating_mul(u64::from(self.quantity))
  }
}
