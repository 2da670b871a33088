// demos/storefront_app/src/state.rs

use crate::config::AppConfig;
use crate::errors::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use storefront::{
  Cart, CatalogEvent, CatalogQuery, CatalogStore, CheckoutController, FileBackend, Product, Session, SharedCart, View,
};

/// Everything one shell session works with: the shared catalog, the
/// visitor's cart and login, and what the current view is showing.
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub store: Arc<CatalogStore<FileBackend>>,
  pub checkout: Arc<CheckoutController>,
  pub cart: SharedCart,
  pub session: Session,
  pub view: View,
  pub query: CatalogQuery,
  /// Product open in the detail view and the size picked for it.
  pub selected: Option<(Product, Option<String>)>,
  listing: Vec<Product>,
  catalog_changed: Arc<AtomicBool>,
}

impl AppState {
  pub fn new(config: Arc<AppConfig>) -> Result<Self> {
    let backend = FileBackend::new(&config.data_dir, &config.record_name);
    tracing::info!(path = %backend.path().display(), "Opening catalog record.");
    let store = CatalogStore::new(backend);
    store.initialize()?;

    let catalog_changed = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&catalog_changed);
    store.subscribe(move |event| {
      match event {
        CatalogEvent::Saved(product) => tracing::info!(product_id = product.id, "Catalog entry saved."),
        CatalogEvent::Deleted(id) => tracing::info!(product_id = id, "Catalog entry deleted."),
        CatalogEvent::Reset => tracing::info!("Catalog reset to defaults."),
      }
      flag.store(true, Ordering::Release);
    });

    let checkout = CheckoutController::new(config.checkout_timings());
    Ok(Self {
      config,
      store: Arc::new(store),
      checkout: Arc::new(checkout),
      cart: Cart::shared(),
      session: Session::new(),
      view: View::Home,
      query: CatalogQuery::default(),
      selected: None,
      listing: Vec::new(),
      catalog_changed,
    })
  }

  /// The catalog as last read, re-read whenever the store reported a change.
  pub fn listing(&mut self) -> &[Product] {
    if self.catalog_changed.swap(false, Ordering::AcqRel) {
      self.listing = self.store.list_all();
      tracing::debug!(count = self.listing.len(), "Catalog listing refreshed.");
    }
    &self.listing
  }

  /// Moves to `target` through the session's guard and returns where we
  /// actually landed.
  pub fn go(&mut self, target: View) -> View {
    let landed = self.session.navigate(self.view, target);
    if landed != View::ProductDetail {
      self.selected = None;
    }
    self.view = landed;
    landed
  }
}
