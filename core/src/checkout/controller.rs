// storefront/src/checkout/controller.rs

//! Defines `CheckoutController`, which runs the two timed checkout phases as
//! a background task, and `CheckoutHandle`, the caller's grip on that task.

use crate::cart::SharedCart;
use crate::catalog::Product;
use crate::checkout::payment::{PaymentSimulator, TimedPayment};
use crate::checkout::phase::{CheckoutPhase, CheckoutTimings, PhaseState};
use crate::error::{StoreError, StoreResult};
use crate::session::View;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{event, info_span, instrument, Instrument, Level};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CheckoutMode {
  /// Single product bought from its detail view. The cart is not touched.
  BuyNow { product_id: u64, size: String },
  /// Whole cart. The cart is cleared when the success phase ends.
  Cart { lines: usize, units: u64 },
}

impl CheckoutMode {
  /// View shown once the checkout is over.
  pub fn return_to(&self) -> View {
    match self {
      CheckoutMode::BuyNow { .. } => View::Shop,
      CheckoutMode::Cart { .. } => View::Home,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
  pub mode: CheckoutMode,
  /// Charged amount, captured when the checkout started.
  pub amount: u64,
  pub reference: String,
  pub return_to: View,
  pub completed_at: DateTime<Utc>,
}

pub struct CheckoutController {
  timings: CheckoutTimings,
  payments: Arc<dyn PaymentSimulator>,
  state: Arc<PhaseState>,
}

impl std::fmt::Debug for CheckoutController {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CheckoutController")
      .field("timings", &self.timings)
      .field("phase", &self.state.current())
      .finish()
  }
}

impl CheckoutController {
  /// Uses `TimedPayment` with the processing delay from `timings`.
  pub fn new(timings: CheckoutTimings) -> Self {
    let payments = Arc::new(TimedPayment::new(timings.processing));
    Self::with_payments(timings, payments)
  }

  /// `timings.processing` is ignored here; the simulator decides how long
  /// processing takes.
  pub fn with_payments(timings: CheckoutTimings, payments: Arc<dyn PaymentSimulator>) -> Self {
    Self {
      timings,
      payments,
      state: Arc::new(PhaseState::new()),
    }
  }

  pub fn timings(&self) -> CheckoutTimings {
    self.timings
  }

  pub fn phase(&self) -> CheckoutPhase {
    self.state.current()
  }

  pub fn subscribe(&self) -> watch::Receiver<CheckoutPhase> {
    self.state.subscribe()
  }

  /// Buys one unit of `product` without going through the cart. Fails with
  /// `SizeNotSelected` when `size` is `None`.
  #[instrument(name = "CheckoutController::buy_now", skip_all, fields(product_id = product.id), err(Display))]
  pub fn buy_now(&self, product: &Product, size: Option<&str>) -> StoreResult<CheckoutHandle> {
    let size = size.ok_or(StoreError::SizeNotSelected)?;
    let mode = CheckoutMode::BuyNow {
      product_id: product.id,
      size: size.to_string(),
    };
    self.start(mode, product.price, None)
  }

  /// Checks out everything in `cart`. Fails with `EmptyCart` when there is
  /// nothing in it.
  #[instrument(name = "CheckoutController::checkout_cart", skip_all, err(Display))]
  pub fn checkout_cart(&self, cart: &SharedCart) -> StoreResult<CheckoutHandle> {
    let (amount, mode) = {
      let guard = cart.read();
      if guard.is_empty() {
        return Err(StoreError::EmptyCart);
      }
      let mode = CheckoutMode::Cart {
        lines: guard.line_count(),
        units: guard.count(),
      };
      (guard.total(), mode)
    };
    self.start(mode, amount, Some(cart.clone()))
  }

  fn start(&self, mode: CheckoutMode, amount: u64, cart: Option<SharedCart>) -> StoreResult<CheckoutHandle> {
    let runtime = tokio::runtime::Handle::try_current()
      .map_err(|e| StoreError::Internal(format!("checkout needs a tokio runtime: {e}")))?;
    let run = self.state.try_begin().ok_or(StoreError::CheckoutInProgress)?;
    event!(Level::INFO, run, amount, ?mode, "Checkout started.");

    let job = CheckoutJob {
      run,
      mode: mode.clone(),
      amount,
      cart,
      success_delay: self.timings.success,
      payments: Arc::clone(&self.payments),
      state: Arc::clone(&self.state),
    };
    let task = runtime.spawn(job.run().instrument(info_span!("checkout", run)));

    Ok(CheckoutHandle {
      run,
      mode,
      task: Some(task),
      state: Arc::clone(&self.state),
    })
  }
}

struct CheckoutJob {
  run: u64,
  mode: CheckoutMode,
  amount: u64,
  cart: Option<SharedCart>,
  success_delay: Duration,
  payments: Arc<dyn PaymentSimulator>,
  state: Arc<PhaseState>,
}

impl CheckoutJob {
  async fn run(self) -> StoreResult<CheckoutReceipt> {
    let approval = match self
      .payments
      .process(self.amount)
      .instrument(info_span!("checkout_phase", phase = "processing"))
      .await
    {
      Ok(approval) => approval,
      Err(e) => {
        event!(Level::ERROR, error = %e, "Payment simulation failed.");
        self.state.finish(self.run);
        return Err(e);
      }
    };

    if !self.state.advance(self.run, CheckoutPhase::Success) {
      return Err(StoreError::CheckoutCancelled);
    }
    tokio::time::sleep(self.success_delay)
      .instrument(info_span!("checkout_phase", phase = "success"))
      .await;

    let cart = self.cart;
    let finished = self.state.finish_with(self.run, || {
      if let Some(cart) = &cart {
        cart.write().clear();
      }
    });
    if !finished {
      return Err(StoreError::CheckoutCancelled);
    }

    event!(Level::INFO, reference = %approval.reference, "Checkout completed.");
    Ok(CheckoutReceipt {
      return_to: self.mode.return_to(),
      mode: self.mode,
      amount: approval.amount,
      reference: approval.reference,
      completed_at: Utc::now(),
    })
  }
}

/// A running checkout. Dropping an unfinished handle cancels it, the same
/// as `cancel`.
#[derive(Debug)]
pub struct CheckoutHandle {
  run: u64,
  mode: CheckoutMode,
  task: Option<JoinHandle<StoreResult<CheckoutReceipt>>>,
  state: Arc<PhaseState>,
}

impl CheckoutHandle {
  pub fn mode(&self) -> &CheckoutMode {
    &self.mode
  }

  pub fn is_finished(&self) -> bool {
    self.task.as_ref().map_or(true, |task| task.is_finished())
  }

  /// Waits for the success phase to end.
  pub async fn wait(mut self) -> StoreResult<CheckoutReceipt> {
    let joined = match self.task.as_mut() {
      Some(task) => task.await,
      None => return Err(StoreError::Internal("checkout task already consumed".to_string())),
    };
    self.task = None;
    match joined {
      Ok(outcome) => outcome,
      Err(e) if e.is_cancelled() => Err(StoreError::CheckoutCancelled),
      Err(e) => {
        self.state.finish(self.run);
        Err(StoreError::Internal(format!("checkout task panicked: {e}")))
      }
    }
  }

  /// Stops the checkout wherever it is and returns the phase to `Idle`. A
  /// cancelled cart checkout never clears the cart.
  pub fn cancel(mut self) {
    self.abort();
  }

  fn abort(&mut self) {
    if let Some(task) = self.task.take() {
      if self.state.finish(self.run) {
        event!(Level::INFO, run = self.run, "Checkout cancelled.");
      }
      task.abort();
    }
  }
}

impl Drop for CheckoutHandle {
  fn drop(&mut self) {
    self.abort();
  }
}
