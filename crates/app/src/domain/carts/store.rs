//! Cart Items Store

use std::{num::NonZeroU32, sync::Arc};

use jiff::{SignedDuration, Timestamp};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::{
    domain::{
        carts::{
            models::{CartItemId, CartLineItem, NewCartLineItem},
            summary::CartSummary,
        },
        events::EventDetailsStore,
    },
    storage::{Storage, StorageError, json},
};

const CART_ITEMS_KEY: &str = "cart_items";

/// Local cart line items.
///
/// Holds at most one item per package reference. Every mutation rewrites the
/// whole collection.
#[derive(Clone)]
pub struct CartItemsStore {
    storage: Arc<dyn Storage>,
    events: EventDetailsStore,
}

impl CartItemsStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, events: EventDetailsStore) -> Self {
        Self { storage, events }
    }

    /// Returns every item in insertion order. Absent or corrupt data reads as
    /// an empty cart.
    #[must_use]
    pub fn list(&self) -> Vec<CartLineItem> {
        json::load(self.storage.as_ref(), CART_ITEMS_KEY).unwrap_or_default()
    }

    #[must_use]
    pub fn get(&self, id: &CartItemId) -> Option<CartLineItem> {
        self.list().into_iter().find(|item| item.id == *id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_items(&self.list())
    }

    /// Adds `candidate` to the cart, merging into the item that already
    /// references the same package.
    ///
    /// A merge overwrites guests, price and event fields and bumps
    /// `updated_at`; the package snapshot and identifier are kept. Both paths
    /// overwrite the shared event details with the candidate's event fields.
    ///
    /// # Errors
    ///
    /// Returns an error when the event details or the items cannot be
    /// written. The event details are written first, so a failure to write
    /// them leaves the cart unchanged.
    pub fn upsert(&self, candidate: NewCartLineItem) -> Result<CartLineItem, StorageError> {
        let mut items = self.list();

        let NewCartLineItem {
            package_ref,
            package_snapshot,
            guests,
            price_at_time,
            event,
        } = candidate;

        let stored = if let Some(existing) = items
            .iter_mut()
            .find(|item| item.package_ref == package_ref)
        {
            existing.guests = guests;
            existing.price_at_time = price_at_time;
            existing.set_event_details(event.clone());
            existing.updated_at = next_update(existing.updated_at);

            debug!(item = %existing.id, package = %existing.package_ref, "merged cart item");

            existing.clone()
        } else {
            let now = Timestamp::now();

            let mut item = CartLineItem {
                id: CartItemId::generate(),
                package_ref,
                package_snapshot,
                guests,
                price_at_time,
                event_date: None,
                event_time: None,
                event_type: None,
                area: None,
                created_at: now,
                updated_at: now,
            };

            item.set_event_details(event.clone());

            info!(item = %item.id, package = %item.package_ref, "added cart item");

            items.push(item.clone());

            item
        };

        self.events.save(&event)?;
        self.persist(&items)?;

        Ok(stored)
    }

    /// Changes the guest count and price of one item.
    ///
    /// Returns `None`, without writing anything, when `id` is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error when the items cannot be written.
    pub fn update_guests(
        &self,
        id: &CartItemId,
        guests: NonZeroU32,
        price_at_time: u64,
    ) -> Result<Option<CartLineItem>, StorageError> {
        let mut items = self.list();

        let Some(item) = items.iter_mut().find(|item| item.id == *id) else {
            debug!(item = %id, "guest update for unknown cart item ignored");

            return Ok(None);
        };

        item.guests = guests;
        item.price_at_time = price_at_time;
        item.updated_at = next_update(item.updated_at);

        let updated = item.clone();

        self.persist(&items)?;

        Ok(Some(updated))
    }

    /// Deletes one item. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error when the items cannot be written.
    pub fn remove(&self, id: &CartItemId) -> Result<bool, StorageError> {
        let ids = FxHashSet::from_iter([id.clone()]);

        Ok(self.remove_many(&ids)? > 0)
    }

    /// Deletes every item.
    ///
    /// # Errors
    ///
    /// Returns an error when the items cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(CART_ITEMS_KEY)
    }

    /// Deletes the items in `ids`, returning how many were removed. Nothing is
    /// written when none of them are present.
    pub(crate) fn remove_many(&self, ids: &FxHashSet<CartItemId>) -> Result<usize, StorageError> {
        let mut items = self.list();
        let before = items.len();

        items.retain(|item| !ids.contains(&item.id));

        let removed = before - items.len();

        if removed > 0 {
            self.persist(&items)?;
        }

        Ok(removed)
    }

    fn persist(&self, items: &[CartLineItem]) -> Result<(), StorageError> {
        json::save(self.storage.as_ref(), CART_ITEMS_KEY, items)
    }
}

impl std::fmt::Debug for CartItemsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartItemsStore")
            .field("key", &CART_ITEMS_KEY)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

/// Next `updated_at` for an item last touched at `previous`, strictly later
/// even when the clock has not moved.
fn next_update(previous: Timestamp) -> Timestamp {
    let now = Timestamp::now();

    if now > previous {
        return now;
    }

    previous
        .checked_add(SignedDuration::from_nanos(1))
        .unwrap_or(now)
}
