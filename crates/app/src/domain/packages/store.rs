//! Custom Packages Store

use std::{num::NonZeroU32, sync::Arc};

use jiff::Timestamp;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::{
    domain::packages::{
        errors::DraftsError,
        models::{CustomPackageDraft, DishId, DraftId},
    },
    storage::{Storage, StorageError, json},
};

const CUSTOM_PACKAGES_KEY: &str = "custom_packages";

/// Staging area for custom package drafts.
///
/// Drafts are immutable once added and only leave the store in bulk.
#[derive(Clone)]
pub struct CustomPackagesStore {
    storage: Arc<dyn Storage>,
}

impl CustomPackagesStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Returns every staged draft in creation order.
    #[must_use]
    pub fn list(&self) -> Vec<CustomPackageDraft> {
        json::load(self.storage.as_ref(), CUSTOM_PACKAGES_KEY).unwrap_or_default()
    }

    /// Stages a new draft made of `dish_ids`.
    ///
    /// Repeated dishes are collapsed, keeping the first occurrence's position.
    ///
    /// # Errors
    ///
    /// Returns [`DraftsError::NoDishes`] when `dish_ids` is empty, or a
    /// storage error when the drafts cannot be written.
    pub fn add(
        &self,
        dish_ids: impl IntoIterator<Item = DishId>,
        people_count: NonZeroU32,
    ) -> Result<CustomPackageDraft, DraftsError> {
        let mut seen = FxHashSet::default();

        let dish_ids: Vec<DishId> = dish_ids
            .into_iter()
            .filter(|dish| seen.insert(dish.clone()))
            .collect();

        if dish_ids.is_empty() {
            return Err(DraftsError::NoDishes);
        }

        let draft = CustomPackageDraft {
            id: DraftId::generate(),
            dish_ids,
            people_count,
            created_at: Timestamp::now(),
        };

        let mut drafts = self.list();

        drafts.push(draft.clone());

        json::save(self.storage.as_ref(), CUSTOM_PACKAGES_KEY, &drafts)?;

        info!(draft = %draft.id, dishes = draft.dish_ids.len(), "staged custom package");

        Ok(draft)
    }

    /// Deletes every draft.
    ///
    /// # Errors
    ///
    /// Returns an error when the drafts cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(CUSTOM_PACKAGES_KEY)
    }

    /// Replaces the staged drafts wholesale.
    pub(crate) fn replace_all(&self, drafts: &[CustomPackageDraft]) -> Result<(), StorageError> {
        if drafts.is_empty() {
            return self.clear();
        }

        debug!(count = drafts.len(), "rewriting staged custom packages");

        json::save(self.storage.as_ref(), CUSTOM_PACKAGES_KEY, drafts)
    }

    /// Returns whether `id` is a staging identifier rather than a remote one.
    #[must_use]
    pub fn is_staged(id: &str) -> bool {
        DraftId::is_staged(id)
    }
}

impl std::fmt::Debug for CustomPackagesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomPackagesStore")
            .field("key", &CUSTOM_PACKAGES_KEY)
            .finish_non_exhaustive()
    }
}
