use std::sync::Arc;

use clap::Args;
use platter_app::{
    api::HttpCateringApi,
    context::CartContext,
    domain::sync::{DraftOutcome, DraftRetention, ItemOutcome},
};

use crate::config::ApiArgs;

#[derive(Debug, Args)]
pub(crate) struct SyncArgs {
    #[command(flatten)]
    api: ApiArgs,

    /// Keep custom packages whose creation failed for the next sync
    #[arg(long)]
    retain_failed_drafts: bool,
}

pub(crate) async fn run(context: &CartContext, args: SyncArgs) -> Result<(), String> {
    let api = HttpCateringApi::new(args.api.into())
        .map_err(|error| format!("failed to build API client: {error}"))?;

    let retention = if args.retain_failed_drafts {
        DraftRetention::RetainFailed
    } else {
        DraftRetention::ClearAll
    };

    let report = context
        .synchronizer(Arc::new(api))
        .with_retention(retention)
        .sync()
        .await;

    if report.is_noop() {
        println!("cart is empty, nothing to sync");
        return Ok(());
    }

    for outcome in &report.drafts {
        match outcome {
            DraftOutcome::Created { draft, package } => {
                println!("draft {draft}: created as package {package}");
            }
            DraftOutcome::Failed { draft, error } => println!("draft {draft}: failed ({error})"),
        }
    }

    for outcome in &report.items {
        match outcome {
            ItemOutcome::Synced { item, package } => println!("item {item}: synced ({package})"),
            ItemOutcome::Failed { item, error } => println!("item {item}: failed ({error})"),
            ItemOutcome::Unresolved { item, package_ref } => {
                println!("item {item}: skipped, package {package_ref} was not created");
            }
        }
    }

    for error in &report.storage_errors {
        println!("storage: {error}");
    }

    println!(
        "synced {} item(s), {} left in the local cart",
        report.synced_count(),
        report.pending_count()
    );

    Ok(())
}
