// storefront/src/catalog/query.rs

//! The shop listing filter: a free-text name search combined with a
//! category filter.

use crate::catalog::product::Product;

/// Label the listing uses for "no category filter".
pub const ALL_CATEGORIES_LABEL: &str = "Все";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
  #[default]
  All,
  Only(String),
}

impl CategoryFilter {
  /// Maps a listing tab label to a filter. The `Все` tab means no filter.
  pub fn from_label(label: &str) -> Self {
    if label == ALL_CATEGORIES_LABEL {
      CategoryFilter::All
    } else {
      CategoryFilter::Only(label.to_string())
    }
  }

  pub fn matches(&self, product: &Product) -> bool {
    match self {
      CategoryFilter::All => true,
      CategoryFilter::Only(category) => product.category == *category,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
  /// Case-insensitive substring of the product name. Empty matches all.
  pub search: String,
  pub category: CategoryFilter,
}

impl CatalogQuery {
  pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
    Self {
      search: search.into(),
      category,
    }
  }

  pub fn matches(&self, product: &Product) -> bool {
    let needle = self.search.to_lowercase();
    product.name.to_lowercase().contains(&needle) && self.category.matches(product)
  }

  /// Matching products in catalog order.
  pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
    products.iter().filter(|p| self.matches(p)).collect()
  }
}
