// storefront/src/checkout/payment.rs

//! The pretend payment step. Nothing is charged anywhere.

use crate::error::StoreResult;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentApproval {
  pub reference: String,
  pub amount: u64,
}

/// Runs the processing phase of a checkout. The checkout stays in
/// `Processing` until the returned future resolves.
#[async_trait]
pub trait PaymentSimulator: Send + Sync + 'static {
  async fn process(&self, amount: u64) -> StoreResult<PaymentApproval>;
}

/// Waits a fixed delay, then approves every payment.
#[derive(Debug, Clone)]
pub struct TimedPayment {
  delay: Duration,
}

impl TimedPayment {
  pub fn new(delay: Duration) -> Self {
    Self { delay }
  }
}

#[async_trait]
impl PaymentSimulator for TimedPayment {
  #[instrument(name = "TimedPayment::process", skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
  async fn process(&self, amount: u64) -> StoreResult<PaymentApproval> {
    tokio::time::sleep(self.delay).await;
    let reference = format!("mock_pay_{}", Uuid::new_v4());
    info!(%reference, "Simulated payment approved.");
    Ok(PaymentApproval { reference, amount })
  }
}
