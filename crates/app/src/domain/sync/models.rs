//! Sync Models

use crate::{
    api::ApiError,
    domain::{
        carts::models::{CartItemId, PackageRef},
        packages::models::{DraftId, RemotePackageId},
    },
    storage::StorageError,
};

/// What happens to staged drafts once a sync pass has attempted them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DraftRetention {
    /// Clear the whole staging store, including drafts whose creation failed.
    #[default]
    ClearAll,

    /// Keep the drafts whose creation failed so a later pass retries them.
    RetainFailed,
}

/// Result of materializing one draft.
#[derive(Debug)]
pub enum DraftOutcome {
    Created {
        draft: DraftId,
        package: RemotePackageId,
    },
    Failed {
        draft: DraftId,
        error: ApiError,
    },
}

/// Result of submitting one cart line item.
#[derive(Debug)]
pub enum ItemOutcome {
    /// Confirmed remotely and removed locally.
    Synced {
        item: CartItemId,
        package: RemotePackageId,
    },

    /// Rejected remotely; kept locally for the next pass.
    Failed { item: CartItemId, error: ApiError },

    /// Not submitted because its staged package has no remote id; kept
    /// locally.
    Unresolved {
        item: CartItemId,
        package_ref: PackageRef,
    },
}

impl ItemOutcome {
    #[must_use]
    pub fn item(&self) -> &CartItemId {
        match self {
            Self::Synced { item, .. } | Self::Failed { item, .. } | Self::Unresolved { item, .. } => {
                item
            }
        }
    }

    #[must_use]
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced { .. })
    }
}

/// Outcome of one sync pass.
///
/// The pass itself never fails; local storage after the pass is the source
/// of truth and this report describes how it got there.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub drafts: Vec<DraftOutcome>,
    pub items: Vec<ItemOutcome>,

    /// Local writes that failed while reconciling the stores.
    pub storage_errors: Vec<StorageError>,
}

impl SyncReport {
    /// Whether the pass had nothing to do.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.drafts.is_empty() && self.items.is_empty() && self.storage_errors.is_empty()
    }

    /// Whether every item was confirmed and every local write succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.items.iter().all(ItemOutcome::is_synced) && self.storage_errors.is_empty()
    }

    #[must_use]
    pub fn synced_count(&self) -> usize {
        self.items.iter().filter(|outcome| outcome.is_synced()).count()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.items.len() - self.synced_count()
    }

    #[must_use]
    pub fn failed_draft_count(&self) -> usize {
        self.drafts
            .iter()
            .filter(|outcome| matches!(outcome, DraftOutcome::Failed { .. }))
            .count()
    }
}
