//! Purchased-photo record derived from order history
//!
//! The backend has no "owned photos" endpoint; ownership is inferred
//! from completed orders. A history line is a digital photo license iff
//! its unit price matches the digital price point, which distinguishes
//! photo lines from product lines sharing the feed's id space.

use shared::client::PastOrder;
use shared::money;
use std::collections::HashSet;

/// Set of photo ids that appear in any completed order
#[derive(Debug, Clone, Default)]
pub struct PurchasedPhotoRecord {
    ids: HashSet<String>,
}

impl PurchasedPhotoRecord {
    /// Derive the record from past orders
    ///
    /// `digital_price_cents` is the digital-photo price point; only
    /// lines priced exactly at it are counted as photo licenses.
    pub fn from_orders(orders: &[PastOrder], digital_price_cents: i64) -> Self {
        let ids = orders
            .iter()
            .flat_map(|order| &order.items)
            .filter(|item| money::to_cents(item.price) == digital_price_cents)
            .map(|item| item.item_id.clone())
            .collect();
        Self { ids }
    }

    pub fn contains(&self, photo_id: &str) -> bool {
        self.ids.contains(photo_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Consume into the raw id set (handed to the cart store)
    pub fn into_ids(self) -> HashSet<String> {
        self.ids
    }
}
