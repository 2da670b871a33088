// storefront/src/checkout/phase.rs

//! Checkout phases and the shared state that guards them.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;

/// `Idle -> Processing -> Success -> Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CheckoutPhase {
  #[default]
  Idle,
  /// Waiting on the payment simulation.
  Processing,
  /// Payment accepted; the confirmation is on screen.
  Success,
}

/// Durations of the two timed phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTimings {
  pub processing: Duration,
  pub success: Duration,
}

impl CheckoutTimings {
  pub fn from_millis(processing_ms: u64, success_ms: u64) -> Self {
    Self {
      processing: Duration::from_millis(processing_ms),
      success: Duration::from_millis(success_ms),
    }
  }
}

impl Default for CheckoutTimings {
  fn default() -> Self {
    Self::from_millis(2000, 4000)
  }
}

/// Phase plus the id of the run that owns it. All transitions happen under
/// the watch channel's lock, so a run that lost ownership (cancelled, or
/// replaced) can never move the phase again.
#[derive(Debug)]
pub(crate) struct PhaseState {
  phase: watch::Sender<CheckoutPhase>,
  runs: AtomicU64,
  // 0 while idle.
  active_run: AtomicU64,
}

impl PhaseState {
  pub(crate) fn new() -> Self {
    let (phase, _) = watch::channel(CheckoutPhase::Idle);
    Self {
      phase,
      runs: AtomicU64::new(0),
      active_run: AtomicU64::new(0),
    }
  }

  pub(crate) fn current(&self) -> CheckoutPhase {
    *self.phase.borrow()
  }

  pub(crate) fn subscribe(&self) -> watch::Receiver<CheckoutPhase> {
    self.phase.subscribe()
  }

  /// Moves `Idle -> Processing` and returns the new run id, or `None` when
  /// another run is active.
  pub(crate) fn try_begin(&self) -> Option<u64> {
    let mut started = None;
    self.phase.send_if_modified(|phase| {
      if *phase != CheckoutPhase::Idle {
        return false;
      }
      let run = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
      self.active_run.store(run, Ordering::SeqCst);
      *phase = CheckoutPhase::Processing;
      started = Some(run);
      true
    });
    started
  }

  pub(crate) fn advance(&self, run: u64, next: CheckoutPhase) -> bool {
    self.phase.send_if_modified(|phase| {
      if self.active_run.load(Ordering::SeqCst) != run {
        return false;
      }
      *phase = next;
      true
    })
  }

  /// Returns to `Idle` if `run` still owns the phase, running `on_finish`
  /// first under the same lock. Returns whether `run` was current.
  pub(crate) fn finish_with(&self, run: u64, on_finish: impl FnOnce()) -> bool {
    self.phase.send_if_modified(|phase| {
      if self.active_run.load(Ordering::SeqCst) != run {
        return false;
      }
      on_finish();
      self.active_run.store(0, Ordering::SeqCst);
      *phase = CheckoutPhase::Idle;
      true
    })
  }

  pub(crate) fn finish(&self, run: u64) -> bool {
    self.finish_with(run, || {})
  }
}
