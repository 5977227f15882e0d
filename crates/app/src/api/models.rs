//! Remote API payloads.

use std::num::NonZeroU32;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    api::ApiError,
    domain::packages::models::{DishId, RemotePackageId},
};

/// Body of the custom package creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCustomPackage {
    pub dish_ids: Vec<DishId>,
    pub people_count: NonZeroU32,
}

/// A package created on the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPackage {
    pub id: RemotePackageId,
}

/// Body of the cart item creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRemoteCartItem {
    pub package_id: RemotePackageId,
    pub guests: NonZeroU32,
    pub price_at_time: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

/// Package identifiers arrive as either JSON strings or numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

#[derive(Debug, Deserialize)]
struct IdBody {
    id: RawId,
}

/// The creation response, bare or wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreatedPackageResponse {
    Bare(IdBody),
    Wrapped { data: IdBody },
}

impl CreatedPackage {
    /// Validates a creation response body.
    pub(crate) fn from_body(body: &str) -> Result<Self, ApiError> {
        let response: CreatedPackageResponse = serde_json::from_str(body).map_err(|error| {
            ApiError::InvalidResponse(format!("package creation response: {error}"))
        })?;

        let (CreatedPackageResponse::Bare(IdBody { id })
        | CreatedPackageResponse::Wrapped {
            data: IdBody { id },
        }) = response;

        let id = match id {
            RawId::Text(text) => text.trim().to_string(),
            RawId::Number(number) => number.to_string(),
        };

        if id.is_empty() {
            return Err(ApiError::InvalidResponse(
                "package creation response has an empty id".to_string(),
            ));
        }

        Ok(Self {
            id: RemotePackageId::new(id),
        })
    }
}
