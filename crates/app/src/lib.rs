//! Local-first catering cart: client-durable stores for cart items, event
//! details and custom package drafts, and a synchronizer that pushes them to
//! the remote catering API.

pub mod api;
pub mod context;
pub mod domain;
pub mod ids;
pub mod storage;
