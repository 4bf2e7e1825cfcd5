//! Cart entry model

use super::catalog::{ItemKind, PurchasableItem};
use serde::{Deserialize, Serialize};

/// Photo bound to a physical product entry
///
/// The customer picks which of their photos goes on the mug/keyring/etc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoundPhoto {
    pub photo_id: String,
    pub photo_uri: String,
}

/// A single cart line
///
/// Owned exclusively by the cart store; everything else reads copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    /// Kind-namespaced id, unique across the whole cart
    pub item_id: String,
    /// Copied from the source item at add-time, immutable thereafter
    pub kind: ItemKind,
    /// Always 1 for digital photos; >= 1 for physical products
    pub quantity: u32,
    /// Price in cents, snapshotted at add-time
    pub unit_price: i64,
    pub display_name: String,
    pub media_reference: String,
    /// Only ever set on physical product entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound_photo: Option<BoundPhoto>,
}

impl CartEntry {
    /// Create a fresh entry (quantity 1) from a catalog item
    pub fn from_item(item: &PurchasableItem) -> Self {
        Self {
            item_id: item.cart_item_id(),
            kind: item.kind,
            quantity: 1,
            unit_price: item.unit_price,
            display_name: item.display_name.clone(),
            media_reference: item.media_reference.clone(),
            bound_photo: None,
        }
    }

    /// Line total in cents
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }

    /// Whether this line can go to payment as-is
    ///
    /// Digital photos are always ready; a physical product needs a
    /// customer-selected photo first.
    pub fn is_checkout_ready(&self) -> bool {
        match self.kind {
            ItemKind::DigitalPhoto => true,
            ItemKind::PhysicalProduct => self.bound_photo.is_some(),
        }
    }
}

/// Per-category quantity counts over the current cart
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartSummary {
    pub physical_count: u32,
    pub digital_count: u32,
}
