//! Cart synchronizer.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    api::{
        CateringApi,
        models::{NewCustomPackage, NewRemoteCartItem},
    },
    domain::{
        carts::{
            CartItemsStore,
            models::{CartItemId, CartLineItem, PackageRef},
        },
        events::EventDetailsStore,
        packages::{
            CustomPackagesStore,
            models::{DraftId, RemotePackageId},
        },
        sync::models::{DraftOutcome, DraftRetention, ItemOutcome, SyncReport},
    },
};

/// Moves locally staged cart state into the remote API.
///
/// Drafts are materialized first so that items referencing them can be
/// submitted with a remote package id. Remote calls run one at a time and
/// each failure only affects its own draft or item.
#[derive(Clone)]
pub struct CartSynchronizer {
    items: CartItemsStore,
    events: EventDetailsStore,
    packages: CustomPackagesStore,
    api: Arc<dyn CateringApi>,
    retention: DraftRetention,
}

impl CartSynchronizer {
    #[must_use]
    pub fn new(
        items: CartItemsStore,
        events: EventDetailsStore,
        packages: CustomPackagesStore,
        api: Arc<dyn CateringApi>,
    ) -> Self {
        Self {
            items,
            events,
            packages,
            api,
            retention: DraftRetention::default(),
        }
    }

    #[must_use]
    pub fn with_retention(mut self, retention: DraftRetention) -> Self {
        self.retention = retention;
        self
    }

    /// Runs one sync pass.
    ///
    /// Confirmed items are removed from the local cart; failed and unresolved
    /// items stay untouched so calling this again retries them.
    #[instrument(skip(self), fields(retention = ?self.retention))]
    pub async fn sync(&self) -> SyncReport {
        let items = self.items.list();

        if items.is_empty() {
            debug!("local cart is empty, nothing to sync");

            return SyncReport::default();
        }

        let mut report = SyncReport::default();

        let packages = self.materialize_drafts(&mut report).await;

        for item in &items {
            let outcome = self.submit_item(item, &packages).await;

            report.items.push(outcome);
        }

        self.remember_event_details(&items, &mut report);
        self.retire_synced(&items, &mut report);

        info!(
            synced = report.synced_count(),
            pending = report.pending_count(),
            failed_drafts = report.failed_draft_count(),
            "cart sync finished"
        );

        report
    }

    async fn materialize_drafts(
        &self,
        report: &mut SyncReport,
    ) -> FxHashMap<DraftId, RemotePackageId> {
        let mut packages = FxHashMap::default();
        let mut failed = Vec::new();

        for draft in self.packages.list() {
            let request = NewCustomPackage {
                dish_ids: draft.dish_ids.clone(),
                people_count: draft.people_count,
            };

            match self.api.create_custom_package(request).await {
                Ok(created) => {
                    info!(draft = %draft.id, package = %created.id, "custom package created");

                    packages.insert(draft.id.clone(), created.id.clone());

                    report.drafts.push(DraftOutcome::Created {
                        draft: draft.id,
                        package: created.id,
                    });
                }
                Err(error) => {
                    error!(draft = %draft.id, %error, "failed to create custom package");

                    report.drafts.push(DraftOutcome::Failed {
                        draft: draft.id.clone(),
                        error,
                    });

                    failed.push(draft);
                }
            }
        }

        let result = match self.retention {
            DraftRetention::ClearAll => {
                if !failed.is_empty() {
                    warn!(count = failed.len(), "discarding custom packages that failed to sync");
                }

                self.packages.clear()
            }
            DraftRetention::RetainFailed => self.packages.replace_all(&failed),
        };

        if let Err(error) = result {
            error!(%error, "failed to update staged custom packages");

            report.storage_errors.push(error);
        }

        packages
    }

    async fn submit_item(
        &self,
        item: &CartLineItem,
        packages: &FxHashMap<DraftId, RemotePackageId>,
    ) -> ItemOutcome {
        let package_id = match &item.package_ref {
            PackageRef::Remote(id) => id.clone(),
            PackageRef::Staged(draft) => {
                let Some(id) = packages.get(draft) else {
                    warn!(item = %item.id, %draft, "custom package has no remote id, skipping item");

                    return ItemOutcome::Unresolved {
                        item: item.id.clone(),
                        package_ref: item.package_ref.clone(),
                    };
                };

                id.clone()
            }
        };

        let request = NewRemoteCartItem {
            package_id: package_id.clone(),
            guests: item.guests,
            price_at_time: item.price_at_time,
            date: item.event_date,
            event_time: item.event_time.clone(),
            event_type: item.event_type.clone(),
            area: item.area.clone(),
        };

        match self.api.create_cart_item(request).await {
            Ok(()) => {
                debug!(item = %item.id, package = %package_id, "cart item synced");

                ItemOutcome::Synced {
                    item: item.id.clone(),
                    package: package_id,
                }
            }
            Err(error) => {
                error!(item = %item.id, %error, "failed to sync cart item");

                ItemOutcome::Failed {
                    item: item.id.clone(),
                    error,
                }
            }
        }
    }

    /// Keeps the event context around after the items carrying it are gone.
    fn remember_event_details(&self, items: &[CartLineItem], report: &mut SyncReport) {
        let source = items
            .iter()
            .find(|item| item.event_details().has_any())
            .or_else(|| items.first());

        let Some(source) = source else {
            return;
        };

        if let Err(error) = self.events.save(&source.event_details()) {
            error!(%error, "failed to save event details");

            report.storage_errors.push(error);
        }
    }

    fn retire_synced(&self, items: &[CartLineItem], report: &mut SyncReport) {
        let synced: FxHashSet<CartItemId> = report
            .items
            .iter()
            .filter(|outcome| outcome.is_synced())
            .map(|outcome| outcome.item().clone())
            .collect();

        let result = if synced.len() == items.len() {
            self.items.clear()
        } else if synced.is_empty() {
            Ok(())
        } else {
            self.items.remove_many(&synced).map(|_| ())
        };

        if let Err(error) = result {
            error!(%error, "failed to remove synced cart items");

            report.storage_errors.push(error);
        }
    }
}

impl std::fmt::Debug for CartSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSynchronizer")
            .field("items", &self.items)
            .field("events", &self.events)
            .field("packages", &self.packages)
            .field("retention", &self.retention)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use reqwest::StatusCode;
    use testresult::TestResult;

    use crate::{
        api::{ApiError, MockCateringApi, models::CreatedPackage},
        domain::{
            carts::models::CartLineItem, events::models::EventDetails, packages::models::DishId,
        },
        test::context::TestContext,
    };

    use super::*;

    fn server_error() -> ApiError {
        ApiError::UnexpectedStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        }
    }

    fn strict_api() -> MockCateringApi {
        let mut api = MockCateringApi::new();

        api.expect_create_custom_package().never();
        api.expect_create_cart_item().never();

        api
    }

    #[tokio::test]
    async fn empty_cart_makes_no_remote_calls_and_touches_nothing() -> TestResult {
        let ctx = TestContext::new();

        let draft = ctx.stage_draft(&["d1"], 10)?;
        ctx.cart.events.save(&EventDetails {
            area: Some("Heliopolis".to_string()),
            ..EventDetails::default()
        })?;

        let report = ctx.synchronizer(strict_api()).sync().await;

        assert!(report.is_noop());
        assert_eq!(ctx.cart.packages.list(), vec![draft]);
        assert_eq!(ctx.cart.events.get().area.as_deref(), Some("Heliopolis"));

        Ok(())
    }

    #[tokio::test]
    async fn full_sync_empties_cart() -> TestResult {
        let ctx = TestContext::new();

        ctx.add_remote_item("p1", 10)?;
        ctx.add_remote_item("p2", 20)?;

        let mut api = MockCateringApi::new();

        api.expect_create_custom_package().never();
        api.expect_create_cart_item().times(2).returning(|_| Ok(()));

        let report = ctx.synchronizer(api).sync().await;

        assert!(report.is_complete());
        assert_eq!(report.synced_count(), 2);
        assert!(ctx.cart.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn failed_item_is_kept_unchanged() -> TestResult {
        let ctx = TestContext::new();

        ctx.add_remote_item("p1", 10)?;
        let second = ctx.add_remote_item("p2", 20)?;
        ctx.add_remote_item("p3", 30)?;

        let mut api = MockCateringApi::new();

        api.expect_create_custom_package().never();
        api.expect_create_cart_item().times(3).returning(|item| {
            if item.package_id.as_str() == "p2" {
                Err(server_error())
            } else {
                Ok(())
            }
        });

        let report = ctx.synchronizer(api).sync().await;

        assert!(!report.is_complete());
        assert_eq!(report.synced_count(), 2);
        assert_eq!(report.pending_count(), 1);
        assert_eq!(ctx.cart.items.list(), vec![second]);

        Ok(())
    }

    #[tokio::test]
    async fn event_details_survive_full_sync() -> TestResult {
        let ctx = TestContext::new();

        let mut candidate = TestContext::remote_candidate("p1", 10)?;
        candidate.event.event_date = Some(date(2025, 12, 1));
        ctx.cart.items.upsert(candidate)?;

        ctx.cart.events.clear()?;

        let mut api = MockCateringApi::new();

        api.expect_create_custom_package().never();
        api.expect_create_cart_item()
            .once()
            .withf(|item| item.date == Some(date(2025, 12, 1)))
            .returning(|_| Ok(()));

        ctx.synchronizer(api).sync().await;

        assert!(ctx.cart.items.is_empty());
        assert_eq!(ctx.cart.events.get().event_date, Some(date(2025, 12, 1)));

        Ok(())
    }

    #[tokio::test]
    async fn event_details_come_from_first_item_carrying_any() -> TestResult {
        let ctx = TestContext::new();

        ctx.add_remote_item("p1", 10)?;

        let mut candidate = TestContext::remote_candidate("p2", 10)?;
        candidate.event.event_type = Some("corporate".to_string());
        candidate.event.area = Some("Sheikh Zayed".to_string());
        ctx.cart.items.upsert(candidate)?;

        // The last upsert had no event fields set.
        ctx.add_remote_item("p3", 10)?;

        let mut api = MockCateringApi::new();

        api.expect_create_cart_item().times(3).returning(|_| Ok(()));

        ctx.synchronizer(api).sync().await;

        let details = ctx.cart.events.get();

        assert_eq!(details.event_type.as_deref(), Some("corporate"));
        assert_eq!(details.area.as_deref(), Some("Sheikh Zayed"));

        Ok(())
    }

    #[tokio::test]
    async fn staged_package_is_created_before_its_item() -> TestResult {
        let ctx = TestContext::new();

        let draft = ctx.stage_draft(&["d1", "d2"], 25)?;
        ctx.add_staged_item(&draft.id, 25)?;

        let mut api = MockCateringApi::new();

        api.expect_create_custom_package()
            .once()
            .withf(|package| {
                package.dish_ids == vec![DishId::new("d1"), DishId::new("d2")]
                    && package.people_count.get() == 25
            })
            .returning(|_| {
                Ok(CreatedPackage {
                    id: RemotePackageId::new("remote-9"),
                })
            });
        api.expect_create_cart_item()
            .once()
            .withf(|item| item.package_id.as_str() == "remote-9")
            .returning(|_| Ok(()));

        let report = ctx.synchronizer(api).sync().await;

        assert!(report.is_complete());
        assert!(ctx.cart.items.is_empty());
        assert!(ctx.cart.packages.list().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn item_of_failed_draft_is_skipped_and_kept() -> TestResult {
        let ctx = TestContext::new();

        let draft = ctx.stage_draft(&["d1"], 12)?;
        let staged = ctx.add_staged_item(&draft.id, 12)?;
        ctx.add_remote_item("p1", 40)?;

        let mut api = MockCateringApi::new();

        api.expect_create_custom_package()
            .once()
            .returning(|_| Err(server_error()));
        api.expect_create_cart_item()
            .once()
            .withf(|item| item.package_id.as_str() == "p1")
            .returning(|_| Ok(()));

        let report = ctx.synchronizer(api).sync().await;

        assert_eq!(report.failed_draft_count(), 1);
        assert!(report.items.iter().any(|outcome| matches!(
            outcome,
            ItemOutcome::Unresolved { item, .. } if *item == staged.id
        )));
        assert_eq!(ctx.cart.items.list(), vec![staged]);

        // The default policy drops the failed draft.
        assert!(ctx.cart.packages.list().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn retain_failed_policy_keeps_only_failed_drafts() -> TestResult {
        let ctx = TestContext::new();

        let created = ctx.stage_draft(&["ok"], 5)?;
        let failing = ctx.stage_draft(&["bad"], 6)?;
        ctx.add_staged_item(&created.id, 5)?;
        ctx.add_staged_item(&failing.id, 6)?;

        let mut api = MockCateringApi::new();

        api.expect_create_custom_package()
            .times(2)
            .returning(|package| {
                if package.dish_ids == vec![DishId::new("bad")] {
                    Err(server_error())
                } else {
                    Ok(CreatedPackage {
                        id: RemotePackageId::new("remote-ok"),
                    })
                }
            });
        api.expect_create_cart_item().once().returning(|_| Ok(()));

        ctx.synchronizer(api)
            .with_retention(DraftRetention::RetainFailed)
            .sync()
            .await;

        assert_eq!(ctx.cart.packages.list(), vec![failing]);
        assert_eq!(ctx.cart.items.list().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn second_pass_after_full_sync_makes_no_calls() -> TestResult {
        let ctx = TestContext::new();

        ctx.add_remote_item("p1", 10)?;
        ctx.add_remote_item("p2", 10)?;

        let mut api = MockCateringApi::new();

        api.expect_create_custom_package().never();
        api.expect_create_cart_item().times(2).returning(|_| Ok(()));

        let synchronizer = ctx.synchronizer(api);

        let first = synchronizer.sync().await;
        let second = synchronizer.sync().await;

        assert_eq!(first.synced_count(), 2);
        assert!(second.is_noop());
        assert!(ctx.cart.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn retry_pass_only_submits_leftovers() -> TestResult {
        let ctx = TestContext::new();

        ctx.add_remote_item("p1", 10)?;
        let kept = ctx.add_remote_item("p2", 10)?;

        let mut failing = MockCateringApi::new();

        failing.expect_create_cart_item().times(2).returning(|item| {
            if item.package_id.as_str() == "p2" {
                Err(server_error())
            } else {
                Ok(())
            }
        });

        ctx.synchronizer(failing).sync().await;

        assert_eq!(ctx.cart.items.list(), vec![kept]);

        let mut recovered = MockCateringApi::new();

        recovered
            .expect_create_cart_item()
            .once()
            .withf(|item| item.package_id.as_str() == "p2")
            .returning(|_| Ok(()));

        let report = ctx.synchronizer(recovered).sync().await;

        assert!(report.is_complete());
        assert!(ctx.cart.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn failed_cart_clear_is_reported_and_items_stay() -> TestResult {
        let (ctx, storage) = TestContext::flaky();

        let item = ctx.add_remote_item("p1", 10)?;

        storage.fail_removes("cart_items")?;

        let mut api = MockCateringApi::new();

        api.expect_create_custom_package().never();
        api.expect_create_cart_item().once().returning(|_| Ok(()));

        let report = ctx.synchronizer(api).sync().await;

        assert_eq!(report.synced_count(), 1);
        assert_eq!(report.storage_errors.len(), 1);
        assert!(!report.is_complete());
        assert_eq!(ctx.cart.items.list(), vec![item]);

        Ok(())
    }

    #[tokio::test]
    async fn failed_draft_clear_is_reported_and_drafts_stay() -> TestResult {
        let (ctx, storage) = TestContext::flaky();

        let draft = ctx.stage_draft(&["d1"], 8)?;
        ctx.add_staged_item(&draft.id, 8)?;

        storage.fail_removes("custom_packages")?;

        let mut api = MockCateringApi::new();

        api.expect_create_custom_package().once().returning(|_| {
            Ok(CreatedPackage {
                id: RemotePackageId::new("remote-3"),
            })
        });
        api.expect_create_cart_item()
            .once()
            .withf(|item| item.package_id.as_str() == "remote-3")
            .returning(|_| Ok(()));

        let report = ctx.synchronizer(api).sync().await;

        assert_eq!(report.synced_count(), 1);
        assert_eq!(report.storage_errors.len(), 1);
        assert!(!report.is_complete());
        assert!(ctx.cart.items.is_empty());
        assert_eq!(ctx.cart.packages.list(), vec![draft]);

        Ok(())
    }

    #[tokio::test]
    async fn failed_event_snapshot_is_reported_and_pass_finishes() -> TestResult {
        let (ctx, storage) = TestContext::flaky();

        let mut candidate = TestContext::remote_candidate("p1", 10)?;
        candidate.event.area = Some("Zamalek".to_string());
        ctx.cart.items.upsert(candidate)?;

        ctx.cart.events.save(&EventDetails {
            area: Some("Nasr City".to_string()),
            ..EventDetails::default()
        })?;

        storage.fail_writes("cart_event_details")?;

        let mut api = MockCateringApi::new();

        api.expect_create_custom_package().never();
        api.expect_create_cart_item().once().returning(|_| Ok(()));

        let report = ctx.synchronizer(api).sync().await;

        assert_eq!(report.synced_count(), 1);
        assert_eq!(report.storage_errors.len(), 1);
        assert!(!report.is_complete());
        assert!(ctx.cart.items.is_empty());
        assert_eq!(ctx.cart.events.get().area.as_deref(), Some("Nasr City"));

        Ok(())
    }

    #[test]
    fn unresolved_outcome_reports_its_item() {
        let id = CartItemId::generate();

        let outcome = ItemOutcome::Unresolved {
            item: id.clone(),
            package_ref: PackageRef::Staged(DraftId::generate()),
        };

        assert_eq!(outcome.item(), &id);
        assert!(!outcome.is_synced());
    }

    #[test]
    fn line_items_are_plain_values() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<CartLineItem>();
        assert_send_sync::<CartSynchronizer>();
    }
}
