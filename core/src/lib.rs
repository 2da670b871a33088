// src/lib.rs

//! Storefront: the catalog and cart logic behind a small menswear shop.
//!
//! The crate provides:
//!  - A catalog store with create/read/update/delete over one persisted
//!    JSON record, seeded on first run and resettable to the seed.
//!  - Pluggable persistence backends (in-memory and file-based).
//!  - A cart that merges repeat adds of the same product and size.
//!  - A checkout simulation with two timed phases, cancellable at any point.
//!  - A pretend login with the navigation guard in front of the views.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod session;
pub mod shared;

// --- Re-exports for the Public API ---

pub use crate::catalog::{
  default_catalog,
  CatalogBackend,
  CatalogEvent,
  CatalogQuery,
  CatalogStore,
  CategoryFilter,
  FileBackend,
  MemoryBackend,
  Product,
  ProductDraft,
};

pub use crate::cart::{Cart, CartItem, SharedCart};

pub use crate::checkout::{
  CheckoutController,
  CheckoutHandle,
  CheckoutMode,
  CheckoutPhase,
  CheckoutReceipt,
  CheckoutTimings,
  PaymentApproval,
  PaymentSimulator,
  TimedPayment,
};

pub use crate::error::{StoreError, StoreResult};
pub use crate::session::{Session, User, View};
pub use crate::shared::Shared;

/*
    Typical wiring:
    1. Build a `CatalogStore` over a backend and call `initialize()` once.
    2. Listing views read `list_all()` and filter with a `CatalogQuery`.
    3. The admin view validates a `ProductDraft`, then calls `save`,
       `delete` or `reset`, and re-fetches on `CatalogEvent`s.
    4. The detail view calls `Cart::add` on the session's `SharedCart`.
    5. The cart view starts `CheckoutController::checkout_cart` and awaits
       the handle, or cancels it when the view goes away.
*/
