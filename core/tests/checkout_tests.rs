// tests/checkout_tests.rs
mod common;

use common::*;
use serial_test::serial;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use storefront::{
  Cart,
  CheckoutController,
  CheckoutMode,
  CheckoutPhase,
  CheckoutTimings,
  StoreError,
  View,
};
use tokio::time::Instant;

fn assert_elapsed(elapsed: Duration, expected_ms: u64) {
  let expected = Duration::from_millis(expected_ms);
  assert!(
    elapsed >= expected && elapsed < expected + Duration::from_millis(5),
    "expected ~{expected:?}, got {elapsed:?}"
  );
}

fn controller() -> (CheckoutController, Arc<std::sync::atomic::AtomicUsize>) {
  let timings = CheckoutTimings::default();
  let payment = CountingPayment::new(timings.processing);
  let calls = payment.calls.clone();
  (CheckoutController::with_payments(timings, Arc::new(payment)), calls)
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_buy_now_requires_size() {
  setup_tracing();
  let (checkout, calls) = controller();
  let suit = product(1, "Suit", "Костюмы", 45000, &["48"]);

  let result = checkout.buy_now(&suit, None);
  assert!(matches!(result, Err(StoreError::SizeNotSelected)));
  assert_eq!(checkout.phase(), CheckoutPhase::Idle);
  assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_buy_now_runs_two_timed_phases() {
  setup_tracing();
  let (checkout, _calls) = controller();
  let mut phases = checkout.subscribe();
  let suit = product(1, "Suit", "Костюмы", 45000, &["48"]);
  let cart = Cart::shared();
  cart.write().add(&suit, "48");

  let started = Instant::now();
  let handle = checkout.buy_now(&suit, Some("48")).unwrap();
  assert_eq!(checkout.phase(), CheckoutPhase::Processing);
  assert!(!handle.is_finished());
  assert_eq!(
    handle.mode(),
    &CheckoutMode::BuyNow {
      product_id: 1,
      size: "48".to_string()
    }
  );

  phases.changed().await.unwrap();
  assert_eq!(*phases.borrow(), CheckoutPhase::Processing);
  phases.changed().await.unwrap();
  assert_eq!(*phases.borrow_and_update(), CheckoutPhase::Success);
  assert_elapsed(started.elapsed(), 2000);

  phases.changed().await.unwrap();
  assert_eq!(*phases.borrow_and_update(), CheckoutPhase::Idle);
  assert_elapsed(started.elapsed(), 6000);
  while !handle.is_finished() {
    tokio::task::yield_now().await;
  }

  let receipt = handle.wait().await.unwrap();
  assert_eq!(receipt.amount, 45000);
  assert_eq!(receipt.return_to, View::Shop);
  assert_eq!(
    receipt.mode,
    CheckoutMode::BuyNow {
      product_id: 1,
      size: "48".to_string()
    }
  );
  // Buying directly never touches the cart.
  assert_eq!(cart.read().count(), 1);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_cart_checkout_requires_items() {
  setup_tracing();
  let (checkout, _calls) = controller();
  let cart = Cart::shared();
  assert!(matches!(checkout.checkout_cart(&cart), Err(StoreError::EmptyCart)));
  assert_eq!(checkout.phase(), CheckoutPhase::Idle);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_cart_checkout_clears_cart_when_success_ends() {
  setup_tracing();
  let (checkout, _calls) = controller();
  let (store, _backend) = seeded_store();
  let cart = Cart::shared();
  {
    let mut guard = cart.write();
    guard.add(&store.get(2).unwrap(), "M");
    guard.add(&store.get(2).unwrap(), "M");
    guard.add(&store.get(7).unwrap(), "One Size");
  }
  let expected_total = cart.read().total();
  let mut phases = checkout.subscribe();

  let handle = checkout.checkout_cart(&cart).unwrap();
  phases.changed().await.unwrap();
  while *phases.borrow_and_update() != CheckoutPhase::Success {
    phases.changed().await.unwrap();
  }
  // Still there while the confirmation is showing.
  assert_eq!(cart.read().count(), 3);
  assert!(!handle.is_finished());
  assert_eq!(handle.mode(), &CheckoutMode::Cart { lines: 2, units: 3 });

  let receipt = handle.wait().await.unwrap();
  assert!(cart.read().is_empty());
  assert_eq!(receipt.amount, expected_total);
  assert_eq!(receipt.amount, 2 * 18500 + 3500);
  assert_eq!(receipt.return_to, View::Home);
  assert_eq!(receipt.mode, CheckoutMode::Cart { lines: 2, units: 3 });
  assert_eq!(checkout.phase(), CheckoutPhase::Idle);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_amount_is_captured_at_start() {
  setup_tracing();
  let (checkout, _calls) = controller();
  let a = product(1, "A", "Обувь", 100, &["41"]);
  let cart = Cart::shared();
  cart.write().add(&a, "41");

  let handle = checkout.checkout_cart(&cart).unwrap();
  cart.write().add(&a, "41");

  let receipt = handle.wait().await.unwrap();
  assert_eq!(receipt.amount, 100);
  // Clearing on completion takes everything, including late additions.
  assert!(cart.read().is_empty());
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_only_one_checkout_at_a_time() {
  setup_tracing();
  let (checkout, _calls) = controller();
  let suit = product(1, "Suit", "Костюмы", 45000, &["48"]);

  let first = checkout.buy_now(&suit, Some("48")).unwrap();
  assert!(matches!(
    checkout.buy_now(&suit, Some("48")),
    Err(StoreError::CheckoutInProgress)
  ));
  first.wait().await.unwrap();

  let second = checkout.buy_now(&suit, Some("48")).unwrap();
  assert!(second.wait().await.is_ok());
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_cancel_during_processing() {
  setup_tracing();
  let (checkout, _calls) = controller();
  let a = product(1, "A", "Обувь", 100, &["41"]);
  let cart = Cart::shared();
  cart.write().add(&a, "41");

  let handle = checkout.checkout_cart(&cart).unwrap();
  tokio::time::sleep(Duration::from_millis(500)).await;
  assert_eq!(checkout.phase(), CheckoutPhase::Processing);

  handle.cancel();
  assert_eq!(checkout.phase(), CheckoutPhase::Idle);

  tokio::time::sleep(Duration::from_secs(30)).await;
  assert_eq!(checkout.phase(), CheckoutPhase::Idle);
  assert_eq!(cart.read().count(), 1);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_cancel_during_success_keeps_cart() {
  setup_tracing();
  let (checkout, _calls) = controller();
  let a = product(1, "A", "Обувь", 100, &["41"]);
  let cart = Cart::shared();
  cart.write().add(&a, "41");
  let mut phases = checkout.subscribe();

  let handle = checkout.checkout_cart(&cart).unwrap();
  while *phases.borrow_and_update() != CheckoutPhase::Success {
    phases.changed().await.unwrap();
  }
  handle.cancel();

  tokio::time::sleep(Duration::from_secs(30)).await;
  assert_eq!(checkout.phase(), CheckoutPhase::Idle);
  assert_eq!(cart.read().count(), 1);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_dropping_handle_cancels() {
  setup_tracing();
  let (checkout, _calls) = controller();
  let a = product(1, "A", "Обувь", 100, &["41"]);
  let cart = Cart::shared();
  cart.write().add(&a, "41");

  {
    let _handle = checkout.checkout_cart(&cart).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
  }
  assert_eq!(checkout.phase(), CheckoutPhase::Idle);
  tokio::time::sleep(Duration::from_secs(30)).await;
  assert_eq!(cart.read().count(), 1);

  // The controller is free again.
  let handle = checkout.checkout_cart(&cart).unwrap();
  handle.wait().await.unwrap();
  assert!(cart.read().is_empty());
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_timed_out_wait_cancels() {
  setup_tracing();
  let (checkout, _calls) = controller();
  let suit = product(1, "Suit", "Костюмы", 45000, &["48"]);

  let handle = checkout.buy_now(&suit, Some("48")).unwrap();
  let waited = tokio::time::timeout(Duration::from_secs(3), handle.wait()).await;
  assert!(waited.is_err());
  assert_eq!(checkout.phase(), CheckoutPhase::Idle);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_declined_payment_returns_to_idle() {
  setup_tracing();
  let checkout = CheckoutController::with_payments(CheckoutTimings::default(), Arc::new(DecliningPayment));
  let a = product(1, "A", "Обувь", 100, &["41"]);
  let cart = Cart::shared();
  cart.write().add(&a, "41");

  let handle = checkout.checkout_cart(&cart).unwrap();
  match handle.wait().await {
    Err(StoreError::Payment(msg)) => assert!(msg.contains("declined")),
    other => panic!("expected StoreError::Payment, got {other:?}"),
  }
  assert_eq!(checkout.phase(), CheckoutPhase::Idle);
  assert_eq!(cart.read().count(), 1);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_default_timed_payment() {
  setup_tracing();
  let checkout = CheckoutController::new(CheckoutTimings::from_millis(50, 80));
  let suit = product(1, "Suit", "Костюмы", 45000, &["48"]);

  let started = Instant::now();
  let receipt = checkout.buy_now(&suit, Some("48")).unwrap().wait().await.unwrap();
  assert_elapsed(started.elapsed(), 130);
  assert!(receipt.reference.starts_with("mock_pay_"));
}

#[test]
fn test_checkout_outside_runtime_is_an_error() {
  let checkout = CheckoutController::new(CheckoutTimings::default());
  let suit = product(1, "Suit", "Костюмы", 45000, &["48"]);
  assert!(matches!(checkout.buy_now(&suit, Some("48")), Err(StoreError::Internal(_))));
  assert_eq!(checkout.phase(), CheckoutPhase::Idle);
}
