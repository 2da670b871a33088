// storefront/src/catalog/product.rs

//! Product records as persisted in the catalog, plus the admin form payload
//! used to create or edit them.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};

/// Categories the admin form offers, in display order.
pub const CATEGORIES: [&str; 5] = ["Костюмы", "Верхняя одежда", "Повседневное", "Обувь", "Аксессуары"];

/// A catalog entry. The JSON shape is the persisted record format, so field
/// names must not change without a coordinated reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  /// Assigned by the store, unique across live products.
  pub id: u64,
  pub name: String,
  pub category: String,
  /// Whole currency units, no minor unit.
  pub price: u64,
  /// Path or URL of the display image. Never checked for existence.
  pub image: String,
  pub description: String,
  pub sizes: Vec<String>,
}

impl Product {
  pub fn offers_size(&self, size: &str) -> bool {
    self.sizes.iter().any(|s| s == size)
  }
}

/// Admin form payload. `id` is `None` for a new product; an id that matches
/// no live product is treated the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<u64>,
  pub name: String,
  pub category: String,
  pub price: u64,
  #[serde(default)]
  pub image: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub sizes: Vec<String>,
}

impl ProductDraft {
  /// Rejects drafts the admin form would not submit: a blank name or a zero
  /// price. The store itself never calls this.
  pub fn validate(&self) -> StoreResult<()> {
    if self.name.trim().is_empty() {
      return Err(StoreError::Validation("Product name is required.".to_string()));
    }
    if self.price == 0 {
      return Err(StoreError::Validation("Product price must be positive.".to_string()));
    }
    Ok(())
  }

  pub(crate) fn into_product(self, id: u64) -> Product {
    Product {
      id,
      name: self.name,
      category: self.category,
      price: self.price,
      image: self.image,
      description: self.description,
      sizes: self.sizes,
    }
  }
}

/// The blank "new product" form.
impl Default for ProductDraft {
  fn default() -> Self {
    Self {
      id: None,
      name: String::new(),
      category: CATEGORIES[0].to_string(),
      price: 0,
      image: "/photos/suit-noir.jpg".to_string(),
      description: String::new(),
      sizes: vec!["S".to_string(), "M".to_string(), "L".to_string()],
    }
  }
}

impl From<&Product> for ProductDraft {
  fn from(product: &Product) -> Self {
    Self {
      id: Some(product.id),
      name: product.name.clone(),
      category: product.category.clone(),
      price: product.price,
      image: product.image.clone(),
      description: product.description.clone(),
      sizes: product.sizes.clone(),
    }
  }
}
