//! Platter Domain Concerns

pub mod carts;
pub mod events;
pub mod packages;
pub mod sync;
