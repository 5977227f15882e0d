//! Event Details Store

use std::sync::Arc;

use tracing::debug;

use crate::{
    domain::events::models::EventDetails,
    storage::{Storage, StorageError, json},
};

const EVENT_DETAILS_KEY: &str = "cart_event_details";

/// Single-record cache of the cart's event context.
///
/// The remote cart item representation does not carry every event field, so
/// the record is kept here independently of the line items.
#[derive(Clone)]
pub struct EventDetailsStore {
    storage: Arc<dyn Storage>,
}

impl EventDetailsStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Overwrites the stored record. Fields absent from `details` are stored
    /// as absent, not merged with the previous record.
    ///
    /// # Errors
    ///
    /// Returns an error when the record cannot be written.
    pub fn save(&self, details: &EventDetails) -> Result<(), StorageError> {
        debug!(?details, "saving event details");

        json::save(self.storage.as_ref(), EVENT_DETAILS_KEY, details)
    }

    /// Returns the stored record, or an empty one.
    #[must_use]
    pub fn get(&self) -> EventDetails {
        json::load(self.storage.as_ref(), EVENT_DETAILS_KEY).unwrap_or_default()
    }

    /// Deletes the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error when the record cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(EVENT_DETAILS_KEY)
    }
}

impl std::fmt::Debug for EventDetailsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDetailsStore")
            .field("key", &EVENT_DETAILS_KEY)
            .finish_non_exhaustive()
    }
}
