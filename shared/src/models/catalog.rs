//! Catalog item models

use serde::{Deserialize, Serialize};

/// Kind of purchasable item
///
/// A digital photo is a one-off license (quantity pinned to 1); a
/// physical product is quantity-bearing and must be bound to a photo
/// before checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    DigitalPhoto,
    PhysicalProduct,
}

impl ItemKind {
    /// Namespace prefix used to build globally unique cart item ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ItemKind::DigitalPhoto => "photo",
            ItemKind::PhysicalProduct => "product",
        }
    }
}

/// Photo type filter used by the gallery feed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhotoType {
    Individual,
    WithSibling,
    WithFriend,
    Group,
}

impl PhotoType {
    /// Wire value for the `photo_type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoType::Individual => "individual",
            PhotoType::WithSibling => "with_sibling",
            PhotoType::WithFriend => "with_friend",
            PhotoType::Group => "group",
        }
    }
}

/// Purchasable catalog item
///
/// Immutable once fetched. `unit_price` is in cents; the cart snapshots
/// it at add-time so later catalog price changes do not affect entries
/// already in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchasableItem {
    /// Opaque identifier, unique within its kind
    pub id: String,
    pub kind: ItemKind,
    /// Price in cents
    pub unit_price: i64,
    pub display_name: String,
    pub description: String,
    /// For digital photos a fetchable image URI, for physical products
    /// a bundled asset reference
    pub media_reference: String,
}

impl PurchasableItem {
    /// Globally unique cart item id (`photo:{id}` / `product:{id}`)
    ///
    /// Digital photo ids and product ids come from different backend
    /// namespaces, so the raw ids alone could collide.
    pub fn cart_item_id(&self) -> String {
        format!("{}:{}", self.kind.id_prefix(), self.id)
    }
}
