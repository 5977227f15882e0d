//! Carts

pub mod models;
mod store;
pub mod summary;

pub use store::CartItemsStore;
pub use summary::CartSummary;
