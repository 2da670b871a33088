// storefront/src/checkout/mod.rs

//! The checkout simulation: a fixed processing delay, a fixed success
//! delay, then back to idle. No money moves.

pub mod controller;
pub mod payment;
pub mod phase;

pub use controller::{CheckoutController, CheckoutHandle, CheckoutMode, CheckoutReceipt};
pub use payment::{PaymentApproval, PaymentSimulator, TimedPayment};
pub use phase::{CheckoutPhase, CheckoutTimings};
