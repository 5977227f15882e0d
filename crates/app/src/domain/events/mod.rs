//! Event Details

pub mod models;
mod store;

pub use store::EventDetailsStore;
