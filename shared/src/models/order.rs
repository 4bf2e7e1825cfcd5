//! Order snapshot models
//!
//! An [`OrderSnapshot`] is frozen once at payment-intent request time and
//! never mutated afterwards; a retried submission reuses the same
//! snapshot and order number.

use super::cart::CartEntry;
use super::catalog::ItemKind;
use serde::{Deserialize, Serialize};

/// Frozen copy of one cart line at submission time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub item_id: String,
    pub kind: ItemKind,
    pub display_name: String,
    pub media_reference: String,
    pub quantity: u32,
    /// Price in cents at add-time
    pub unit_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound_photo_id: Option<String>,
}

impl From<&CartEntry> for OrderLine {
    fn from(entry: &CartEntry) -> Self {
        Self {
            item_id: entry.item_id.clone(),
            kind: entry.kind,
            display_name: entry.display_name.clone(),
            media_reference: entry.media_reference.clone(),
            quantity: entry.quantity,
            unit_price: entry.unit_price,
            bound_photo_id: entry.bound_photo.as_ref().map(|p| p.photo_id.clone()),
        }
    }
}

/// Immutable order snapshot, one per checkout attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSnapshot {
    /// Client-generated display identifier; the server-assigned order id
    /// is the authoritative one
    pub order_number: String,
    pub line_items: Vec<OrderLine>,
    /// Subtotal in cents
    pub subtotal: i64,
    /// Tax in cents
    pub tax: i64,
    /// Total in cents (what gets charged)
    pub total: i64,
    /// Creation timestamp (Unix millis)
    pub created_at: i64,
}

impl OrderSnapshot {
    /// Line items that are digital photo licenses
    ///
    /// Used after a successful payment to drive the "download your
    /// photos" prompt.
    pub fn digital_lines(&self) -> Vec<OrderLine> {
        self.line_items
            .iter()
            .filter(|l| l.kind == ItemKind::DigitalPhoto)
            .cloned()
            .collect()
    }
}
