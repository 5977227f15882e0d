//! Custom Packages
//!
//! Drafts of "build your own" packages that do not exist on the remote API
//! yet.

pub mod errors;
pub mod models;
mod store;

pub use errors::DraftsError;
pub use store::CustomPackagesStore;
