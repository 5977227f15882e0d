//! Remote catering API.

use async_trait::async_trait;
use mockall::automock;

mod client;
pub mod errors;
pub mod models;

pub use client::{ApiConfig, HttpCateringApi};
pub use errors::ApiError;

use crate::api::models::{CreatedPackage, NewCustomPackage, NewRemoteCartItem};

/// Remote operations the cart synchronizer depends on.
#[automock]
#[async_trait]
pub trait CateringApi: Send + Sync {
    /// Creates a package from a set of dishes and returns its remote id.
    async fn create_custom_package(
        &self,
        package: NewCustomPackage,
    ) -> Result<CreatedPackage, ApiError>;

    /// Adds an item to the authenticated user's remote cart.
    async fn create_cart_item(&self, item: NewRemoteCartItem) -> Result<(), ApiError>;
}
