// storefront/src/cart/mod.rs

//! The in-memory shopping cart.

pub mod aggregator;
pub mod item;

pub use aggregator::{Cart, SharedCart};
pub use item::CartItem;
