// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use async_trait::async_trait;
use storefront::{
  CatalogStore,
  MemoryBackend,
  PaymentApproval,
  PaymentSimulator,
  Product,
  ProductDraft,
  StoreError,
  StoreResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- Fixtures ---

pub fn product(id: u64, name: &str, category: &str, price: u64, sizes: &[&str]) -> Product {
  Product {
    id,
    name: name.to_string(),
    category: category.to_string(),
    price,
    image: format!("/photos/{id}.jpg"),
    description: String::new(),
    sizes: sizes.iter().map(|s| s.to_string()).collect(),
  }
}

pub fn draft(name: &str, price: u64) -> ProductDraft {
  ProductDraft {
    name: name.to_string(),
    price,
    sizes: vec!["M".to_string()],
    ..ProductDraft::default()
  }
}

/// A store over a fresh in-memory backend, already initialized with the
/// default seed. The returned backend shares the store's record.
pub fn seeded_store() -> (CatalogStore<MemoryBackend>, MemoryBackend) {
  let backend = MemoryBackend::new();
  let store = CatalogStore::new(backend.clone());
  store.initialize().expect("seeding an in-memory backend cannot fail");
  (store, backend)
}

pub fn ids(products: &[Product]) -> Vec<u64> {
  products.iter().map(|p| p.id).collect()
}

// --- Payment simulators ---

/// Approves after `delay` and counts how often it ran.
pub struct CountingPayment {
  pub delay: Duration,
  pub calls: Arc<AtomicUsize>,
}

impl CountingPayment {
  pub fn new(delay: Duration) -> Self {
    Self {
      delay,
      calls: Arc::new(AtomicUsize::new(0)),
    }
  }
}

#[async_trait]
impl PaymentSimulator for CountingPayment {
  async fn process(&self, amount: u64) -> StoreResult<PaymentApproval> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(self.delay).await;
    Ok(PaymentApproval {
      reference: format!("test_pay_{}", self.calls.load(Ordering::SeqCst)),
      amount,
    })
  }
}

pub struct DecliningPayment;

#[async_trait]
impl PaymentSimulator for DecliningPayment {
  async fn process(&self, _amount: u64) -> StoreResult<PaymentApproval> {
    tokio::time::sleep(Duration::from_millis(10)).await;
    Err(StoreError::Payment("card declined".to_string()))
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
