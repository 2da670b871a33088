// storefront/examples/cart_checkout.rs

use storefront::{Cart, CatalogStore, CheckoutController, CheckoutTimings, MemoryBackend, StoreError};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), StoreError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Cart Checkout Example ---");

  // 1. Catalog over an in-memory record, seeded on first use
  let store = CatalogStore::new(MemoryBackend::new());
  store.initialize()?;

  // 2. Fill a cart; the second bomber in M merges into the first line
  let cart = Cart::shared();
  {
    let bomber = store.get(2).ok_or_else(|| StoreError::Internal("seed is missing product 2".into()))?;
    let scarf = store.get(7).ok_or_else(|| StoreError::Internal("seed is missing product 7".into()))?;
    let mut guard = cart.write();
    guard.add(&bomber, "M");
    guard.add(&bomber, "M");
    guard.add(&scarf, "One Size");
    info!(lines = guard.line_count(), units = guard.count(), total = guard.total(), "Cart filled.");
  }

  // 3. Check out with short delays and watch the phases go by
  let checkout = CheckoutController::new(CheckoutTimings::from_millis(300, 500));
  let mut phases = checkout.subscribe();
  let handle = checkout.checkout_cart(&cart)?;

  let watcher = tokio::spawn(async move {
    while phases.changed().await.is_ok() {
      let phase = *phases.borrow_and_update();
      info!(?phase, "Phase changed.");
    }
  });

  let receipt = handle.wait().await?;
  info!(reference = %receipt.reference, amount = receipt.amount, return_to = ?receipt.return_to, "Checkout finished.");
  info!(cart_empty = cart.read().is_empty(), "Cart after checkout.");

  drop(checkout);
  let _ = watcher.await;
  Ok(())
}
