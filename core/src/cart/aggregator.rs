// storefront/src/cart/aggregator.rs

//! Defines `Cart`, the session's ordered list of line items with
//! merge-on-add semantics.

use crate::cart::item::CartItem;
use crate::catalog::Product;
use crate::shared::Shared;
use serde::Serialize;
use tracing::{event, Level};

/// The cart as shared between views and a running checkout.
pub type SharedCart = Shared<Cart>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
  items: Vec<CartItem>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn shared() -> SharedCart {
    Shared::new(Self::new())
  }

  /// Adds one unit of `product` in `size`.
  ///
  /// An existing (id, size) line gets its quantity bumped and keeps its
  /// original snapshot and position; otherwise a new line is appended.
  pub fn add(&mut self, product: &Product, size: impl Into<String>) -> &CartItem {
    let size = size.into();
    match self.items.iter().position(|item| item.is_line(product.id, &size)) {
      Some(idx) => {
        let item = &mut self.items[idx];
        item.quantity = item.quantity.saturating_add(1);
        event!(Level::DEBUG, product_id = product.id, size = %size, quantity = item.quantity, "Merged into existing cart line.");
        &self.items[idx]
      }
      None => {
        event!(Level::DEBUG, product_id = product.id, size = %size, "Appended new cart line.");
        self.items.push(CartItem::new(product, size));
        &self.items[self.items.len() - 1]
      }
    }
  }

  /// Drops the whole (id, size) line regardless of its quantity.
  pub fn remove(&mut self, product_id: u64, size: &str) -> Option<CartItem> {
    let idx = self.items.iter().position(|item| item.is_line(product_id, size))?;
    event!(Level::DEBUG, product_id, size, "Removed cart line.");
    Some(self.items.remove(idx))
  }

  pub fn clear(&mut self) {
    event!(Level::DEBUG, lines = self.items.len(), "Cart cleared.");
    self.items.clear();
  }

  /// Sum of `price * quantity` over all lines, capped at `u64::MAX`.
  pub fn total(&self) -> u64 {
    self
      .items
      .iter()
      .map(CartItem::line_total)
      .fold(0, u64::saturating_add)
  }

  /// Sum of quantities, i.e. the badge number. Not the number of lines.
  pub fn count(&self) -> u64 {
    self
      .items
      .iter()
      .map(|item| u64::from(item.quantity))
      .fold(0, u64::saturating_add)
  }

  pub fn items(&self) -> &[CartItem] {
    &self.items
  }

  pub fn get(&self, product_id: u64, size: &str) -> Option<&CartItem> {
    self.items.iter().find(|item| item.is_line(product_id, size))
  }

  pub fn line_count(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}
