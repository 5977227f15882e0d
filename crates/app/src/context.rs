//! App Context

use std::{path::PathBuf, sync::Arc};

use crate::{
    api::CateringApi,
    domain::{
        carts::CartItemsStore, events::EventDetailsStore, packages::CustomPackagesStore,
        sync::CartSynchronizer,
    },
    storage::{FileStorage, Storage},
};

/// The cart stores, built once over a shared storage backend.
#[derive(Debug, Clone)]
pub struct CartContext {
    pub items: CartItemsStore,
    pub events: EventDetailsStore,
    pub packages: CustomPackagesStore,
}

impl CartContext {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let events = EventDetailsStore::new(storage.clone());

        Self {
            items: CartItemsStore::new(storage.clone(), events.clone()),
            packages: CustomPackagesStore::new(storage),
            events,
        }
    }

    /// Build a context persisting to JSON files under `dir`.
    #[must_use]
    pub fn from_storage_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileStorage::new(dir)))
    }

    /// A synchronizer over this context's stores.
    #[must_use]
    pub fn synchronizer(&self, api: Arc<dyn CateringApi>) -> CartSynchronizer {
        CartSynchronizer::new(
            self.items.clone(),
            self.events.clone(),
            self.packages.clone(),
            api,
        )
    }
}
