//! Cart Models

use std::{fmt, num::NonZeroU32, str::FromStr};

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        events::models::EventDetails,
        packages::models::{DraftId, RemotePackageId},
    },
    ids::{IdPrefix, LocalId},
};

/// Local identifier of a cart line item.
pub type CartItemId = LocalId<CartLineItem>;

impl IdPrefix for CartLineItem {
    const PREFIX: &'static str = "local_";
}

/// Package reference that could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("package reference cannot be empty")]
pub struct EmptyPackageRef;

/// Reference from a line item to the package it is priced for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PackageRef {
    /// A package known to the remote API.
    Remote(RemotePackageId),

    /// A custom package still waiting in the staging store.
    Staged(DraftId),
}

impl PackageRef {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Remote(id) => id.as_str(),
            Self::Staged(id) => id.as_str(),
        }
    }
}

impl FromStr for PackageRef {
    type Err = EmptyPackageRef;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().is_empty() {
            return Err(EmptyPackageRef);
        }

        Ok(value
            .parse::<DraftId>()
            .map_or_else(|_| Self::Remote(RemotePackageId::new(value)), Self::Staged))
    }
}

impl TryFrom<String> for PackageRef {
    type Error = EmptyPackageRef;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PackageRef> for String {
    fn from(value: PackageRef) -> Self {
        match value {
            PackageRef::Remote(id) => id.as_str().to_string(),
            PackageRef::Staged(id) => id.into_string(),
        }
    }
}

impl From<RemotePackageId> for PackageRef {
    fn from(value: RemotePackageId) -> Self {
        Self::Remote(value)
    }
}

impl From<DraftId> for PackageRef {
    fn from(value: DraftId) -> Self {
        Self::Staged(value)
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display copy of a package taken when it was added to the cart.
///
/// Not refreshed when the catalogue changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageSnapshot {
    pub name: String,
    pub people_count: Option<u32>,

    /// Total package price in minor units.
    pub total_price: Option<u64>,

    /// Price per guest in minor units.
    pub price_per_person: Option<u64>,

    pub currency: Option<String>,
    pub cover_image: Option<String>,
    pub caterer_id: Option<String>,
    pub caterer_name: Option<String>,
}

impl PackageSnapshot {
    /// Price of this package for `guests`, in minor units.
    ///
    /// Uses the per-person price when known, otherwise the flat total.
    #[must_use]
    pub fn price_for(&self, guests: NonZeroU32) -> u64 {
        match self.price_per_person {
            Some(per_person) => per_person.saturating_mul(u64::from(guests.get())),
            None => self.total_price.unwrap_or_default(),
        }
    }
}

/// A package-plus-guest-count entry in the local cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: CartItemId,
    pub package_ref: PackageRef,

    #[serde(default)]
    pub package_snapshot: PackageSnapshot,

    pub guests: NonZeroU32,

    /// Price for `guests` in minor units, fixed when the item was last written.
    pub price_at_time: u64,

    #[serde(default)]
    pub event_date: Option<Date>,

    #[serde(default)]
    pub event_time: Option<String>,

    #[serde(default)]
    pub event_type: Option<String>,

    #[serde(default)]
    pub area: Option<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartLineItem {
    /// The item's event fields as a standalone record.
    #[must_use]
    pub fn event_details(&self) -> EventDetails {
        EventDetails {
            event_date: self.event_date,
            event_time: self.event_time.clone(),
            event_type: self.event_type.clone(),
            area: self.area.clone(),
        }
    }

    pub(crate) fn set_event_details(&mut self, event: EventDetails) {
        self.event_date = event.event_date;
        self.event_time = event.event_time;
        self.event_type = event.event_type;
        self.area = event.area;
    }
}

/// Line item data supplied by the caller when adding to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLineItem {
    pub package_ref: PackageRef,
    pub package_snapshot: PackageSnapshot,
    pub guests: NonZeroU32,
    pub price_at_time: u64,
    pub event: EventDetails,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn guests(count: u32) -> Result<NonZeroU32, &'static str> {
        NonZeroU32::new(count).ok_or("guest count must be positive")
    }

    #[test]
    fn staged_prefix_parses_as_staged_reference() -> TestResult {
        let draft = DraftId::generate();

        let parsed: PackageRef = draft.as_str().parse()?;

        assert_eq!(parsed, PackageRef::Staged(draft));

        Ok(())
    }

    #[test]
    fn anything_else_is_remote() -> TestResult {
        let parsed: PackageRef = "pkg-17".parse()?;

        assert_eq!(parsed, PackageRef::Remote(RemotePackageId::new("pkg-17")));

        Ok(())
    }

    #[test]
    fn blank_reference_is_rejected() {
        assert_eq!("  ".parse::<PackageRef>(), Err(EmptyPackageRef));
    }

    #[test]
    fn package_ref_serializes_as_plain_string() -> TestResult {
        let reference = PackageRef::Remote(RemotePackageId::new("99"));

        assert_eq!(serde_json::to_string(&reference)?, "\"99\"");

        Ok(())
    }

    #[test]
    fn price_prefers_per_person_rate() -> TestResult {
        let snapshot = PackageSnapshot {
            total_price: Some(50_000),
            price_per_person: Some(2_500),
            ..PackageSnapshot::default()
        };

        assert_eq!(snapshot.price_for(guests(30)?), 75_000);

        Ok(())
    }

    #[test]
    fn price_falls_back_to_total() -> TestResult {
        let snapshot = PackageSnapshot {
            total_price: Some(50_000),
            ..PackageSnapshot::default()
        };

        assert_eq!(snapshot.price_for(guests(30)?), 50_000);
        assert_eq!(PackageSnapshot::default().price_for(guests(3)?), 0);

        Ok(())
    }

    #[test]
    fn line_item_uses_camel_case_layout() -> TestResult {
        let json = r#"{
            "id": "local_abc",
            "packageRef": "custom_def",
            "packageSnapshot": { "name": "Mezze", "pricePerPerson": 1200 },
            "guests": 10,
            "priceAtTime": 12000,
            "eventDate": "2025-12-01",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }"#;

        let item: CartLineItem = serde_json::from_str(json)?;

        assert!(matches!(item.package_ref, PackageRef::Staged(_)));
        assert_eq!(item.package_snapshot.price_per_person, Some(1200));
        assert_eq!(item.event_date.map(|date| date.to_string()).as_deref(), Some("2025-12-01"));
        assert_eq!(item.event_time, None);

        Ok(())
    }

    #[test]
    fn zero_guests_do_not_deserialize() {
        let json = r#"{
            "id": "local_abc",
            "packageRef": "12",
            "guests": 0,
            "priceAtTime": 0,
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }"#;

        assert!(serde_json::from_str::<CartLineItem>(json).is_err());
    }
}
