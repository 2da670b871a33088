// storefront/src/catalog/store.rs

//! Defines `CatalogStore`, CRUD access to the product catalog over a single
//! persisted record.
//!
//! Every mutation decodes the whole record, edits it in memory and rewrites
//! the whole record. There is no locking across processes; two writers on
//! the same record are last-writer-wins.

use crate::catalog::backend::CatalogBackend;
use crate::catalog::product::{Product, ProductDraft};
use crate::catalog::seed::default_catalog;
use crate::error::{StoreError, StoreResult};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// What changed after a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
  Saved(Product),
  Deleted(u64),
  /// The record was overwritten with the seed catalog. Anything derived
  /// from the store should be re-fetched.
  Reset,
}

pub type CatalogListener = Arc<dyn Fn(&CatalogEvent) + Send + Sync + 'static>;

pub struct CatalogStore<B: CatalogBackend> {
  backend: B,
  seed: Vec<Product>,
  listeners: RwLock<Vec<CatalogListener>>,
}

impl<B: CatalogBackend> fmt::Debug for CatalogStore<B> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CatalogStore")
      .field("seed_len", &self.seed.len())
      .field("listeners", &self.listeners.read().len())
      .finish()
  }
}

impl<B: CatalogBackend> CatalogStore<B> {
  /// A store seeded with the default catalog.
  pub fn new(backend: B) -> Self {
    Self::with_seed(backend, default_catalog())
  }

  pub fn with_seed(backend: B, seed: Vec<Product>) -> Self {
    Self {
      backend,
      seed,
      listeners: RwLock::new(Vec::new()),
    }
  }

  pub fn backend(&self) -> &B {
    &self.backend
  }

  pub fn seed(&self) -> &[Product] {
    &self.seed
  }

  /// Registers a callback run after every successful write.
  pub fn subscribe(&self, listener: impl Fn(&CatalogEvent) + Send + Sync + 'static) {
    self.listeners.write().push(Arc::new(listener));
  }

  /// Writes the seed catalog if no record exists yet. Calling it again is a
  /// no-op, including when the existing record is unreadable as JSON.
  #[instrument(name = "CatalogStore::initialize", skip_all, err(Display))]
  pub fn initialize(&self) -> StoreResult<()> {
    let existing = self
      .backend
      .read()
      .map_err(|e| StoreError::backend("initialize", e))?;
    if existing.is_some() {
      event!(Level::DEBUG, "Catalog record already present, leaving it untouched.");
      return Ok(());
    }
    event!(Level::INFO, products = self.seed.len(), "Seeding empty catalog.");
    self.write_all(&self.seed, "initialize")
  }

  /// All products in stored order. A missing, unreadable or undecodable
  /// record yields an empty list.
  pub fn list_all(&self) -> Vec<Product> {
    match self.load("list_all") {
      Ok(products) => products,
      Err(e) => {
        event!(Level::WARN, error = %e, "Catalog record could not be read, treating it as empty.");
        Vec::new()
      }
    }
  }

  pub fn get(&self, id: u64) -> Option<Product> {
    self.list_all().into_iter().find(|p| p.id == id)
  }

  /// Updates the product with the draft's id in place, or appends a new
  /// product with id `max + 1` (1 for an empty catalog) when the draft has
  /// no id or an id nobody owns.
  #[instrument(name = "CatalogStore::save", skip_all, fields(draft_id = ?draft.id), err(Display))]
  pub fn save(&self, draft: ProductDraft) -> StoreResult<Product> {
    let mut products = self.load("save")?;
    let existing = draft
      .id
      .and_then(|id| products.iter().position(|p| p.id == id));

    let saved = match existing {
      Some(idx) => {
        let id = products[idx].id;
        let product = draft.into_product(id);
        products[idx] = product.clone();
        event!(Level::DEBUG, id, position = idx, "Updating product in place.");
        product
      }
      None => {
        let id = next_id(&products)?;
        let product = draft.into_product(id);
        products.push(product.clone());
        event!(Level::DEBUG, id, "Appending new product.");
        product
      }
    };

    self.write_all(&products, "save")?;
    self.notify(&CatalogEvent::Saved(saved.clone()));
    Ok(saved)
  }

  /// Removes the product with `id`. Unknown ids leave the list unchanged but
  /// the record is still rewritten.
  #[instrument(name = "CatalogStore::delete", skip(self), err(Display))]
  pub fn delete(&self, id: u64) -> StoreResult<()> {
    let mut products = self.load("delete")?;
    let before = products.len();
    products.retain(|p| p.id != id);
    if products.len() == before {
      event!(Level::DEBUG, id, "No product with this id, nothing removed.");
    }
    self.write_all(&products, "delete")?;
    self.notify(&CatalogEvent::Deleted(id));
    Ok(())
  }

  /// Overwrites the record with the seed catalog and emits
  /// `CatalogEvent::Reset`.
  #[instrument(name = "CatalogStore::reset", skip_all, err(Display))]
  pub fn reset(&self) -> StoreResult<()> {
    self.write_all(&self.seed, "reset")?;
    event!(Level::INFO, products = self.seed.len(), "Catalog reset to seed.");
    self.notify(&CatalogEvent::Reset);
    Ok(())
  }

  /// Decodes the record for `operation`. A missing or undecodable record is
  /// an empty catalog; a backend read failure is an error.
  fn load(&self, operation: &'static str) -> StoreResult<Vec<Product>> {
    let bytes = match self.backend.read() {
      Ok(Some(bytes)) => bytes,
      Ok(None) => return Ok(Vec::new()),
      Err(e) => return Err(StoreError::backend(operation, e)),
    };
    match serde_json::from_slice::<Vec<Product>>(&bytes) {
      Ok(products) => Ok(products),
      Err(e) => {
        event!(Level::WARN, operation, error = %e, "Catalog record is not a product list, treating it as empty.");
        Ok(Vec::new())
      }
    }
  }

  fn write_all(&self, products: &[Product], operation: &'static str) -> StoreResult<()> {
    let bytes = serde_json::to_vec(products)?;
    self.backend.write(&bytes).map_err(|e| {
      event!(Level::ERROR, operation, error = %e, "Catalog record write failed.");
      StoreError::backend(operation, e)
    })
  }

  fn notify(&self, catalog_event: &CatalogEvent) {
    // Clone the list so a listener may subscribe again without deadlocking.
    let listeners: Vec<CatalogListener> = self.listeners.read().clone();
    for listener in listeners {
      listener(catalog_event);
    }
  }
}

fn next_id(products: &[Product]) -> StoreResult<u64> {
  match products.iter().map(|p| p.id).max() {
    None => Ok(1),
    Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted(max)),
  }
}
