//! Cart Summary

use crate::domain::carts::models::CartLineItem;

/// Totals over the local cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSummary {
    pub item_count: usize,
    pub guest_count: u64,

    /// Sum of every item's `price_at_time`, in minor units.
    pub total: u64,

    /// Currency shared by every item; `None` when empty, unknown or mixed.
    pub currency: Option<String>,
}

impl CartSummary {
    #[must_use]
    pub fn from_items(items: &[CartLineItem]) -> Self {
        let mut currencies = items
            .iter()
            .map(|item| item.package_snapshot.currency.as_deref());

        let currency = match currencies.next() {
            Some(Some(first)) if currencies.all(|currency| currency == Some(first)) => {
                Some(first.to_string())
            }
            _ => None,
        };

        Self {
            item_count: items.len(),
            guest_count: items.iter().map(|item| u64::from(item.guests.get())).sum(),
            total: items
                .iter()
                .fold(0_u64, |total, item| total.saturating_add(item.price_at_time)),
            currency,
        }
    }
}
