//! Cart Synchronization

pub mod models;
mod service;

pub use models::{DraftOutcome, DraftRetention, ItemOutcome, SyncReport};
pub use service::CartSynchronizer;
