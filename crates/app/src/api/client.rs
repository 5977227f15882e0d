//! HTTP client for the catering API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;

use crate::api::{
    CateringApi,
    errors::ApiError,
    models::{CreatedPackage, NewCustomPackage, NewRemoteCartItem},
};

const CUSTOM_PACKAGES_PATH: &str = "/packages/custom";
const CART_ITEMS_PATH: &str = "/cart/items";

/// Configuration for connecting to the catering API.
#[derive(Clone)]
pub struct ApiConfig {
    /// API base URL, e.g. `"https://api.example.com/v1"`.
    pub base_url: String,

    /// Bearer token of the signed-in user, if any.
    pub token: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// [`CateringApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCateringApi {
    config: ApiConfig,
    http: Client,
}

impl HttpCateringApi {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> RequestBuilder {
        let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));

        let request = self.http.post(url).json(body);

        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl CateringApi for HttpCateringApi {
    async fn create_custom_package(
        &self,
        package: NewCustomPackage,
    ) -> Result<CreatedPackage, ApiError> {
        debug!(dishes = package.dish_ids.len(), "creating custom package");

        let response = self.post(CUSTOM_PACKAGES_PATH, &package).send().await?;
        let body = success_body(response).await?;

        CreatedPackage::from_body(&body)
    }

    async fn create_cart_item(&self, item: NewRemoteCartItem) -> Result<(), ApiError> {
        debug!(package = %item.package_id, "creating remote cart item");

        let response = self.post(CART_ITEMS_PATH, &item).send().await?;

        success_body(response).await?;

        Ok(())
    }
}

async fn success_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::UnexpectedStatus { status, body });
    }

    Ok(body)
}
