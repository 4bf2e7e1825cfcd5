//! Client-related types shared between the cart engine and the API client
//!
//! Wire DTOs for the shop backend: gallery feed, order creation and
//! order history. Field names follow the backend's JSON contract.

use crate::models::{ItemKind, OrderLine, PhotoType, PurchasableItem};
use crate::money;
use serde::{Deserialize, Serialize};

// =============================================================================
// Buyer identity
// =============================================================================

/// The signed-in parent placing the order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuyerIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
}

// =============================================================================
// Gallery feed DTOs
// =============================================================================

/// A photo record as returned by the gallery feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryPhoto {
    pub id: String,
    pub event_name: String,
    pub student_name: String,
    pub photo_type: PhotoType,
    pub image_url: String,
    /// Decimal price as sent by the backend
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl GalleryPhoto {
    /// Convert to a purchasable item (price normalized to cents)
    pub fn into_item(self) -> PurchasableItem {
        PurchasableItem {
            unit_price: money::to_cents(self.price),
            display_name: self.event_name,
            description: self.description.unwrap_or_default(),
            media_reference: self.image_url,
            id: self.id,
            kind: ItemKind::DigitalPhoto,
        }
    }
}

/// Gallery feed query
///
/// `search` is free text matched against both the event name and the
/// student name on the server side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub photo_type: Option<PhotoType>,
}

impl CatalogQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: None,
            photo_type: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_photo_type(mut self, photo_type: PhotoType) -> Self {
        self.photo_type = Some(photo_type);
        self
    }

    /// Build the query-string pairs for the GET request
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("event_name", search.clone()));
            pairs.push(("student_name", search.clone()));
        }
        if let Some(photo_type) = self.photo_type {
            pairs.push(("photo_type", photo_type.as_str().to_string()));
        }
        pairs
    }
}

/// Paginated list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        Self {
            data,
            total,
            page,
            limit,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.limit == 0 {
            return 1;
        }
        ((self.total as f64) / (self.limit as f64)).ceil() as u32
    }
}

// =============================================================================
// Order creation DTOs
// =============================================================================

/// One itemized line in the order-creation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemPayload {
    pub id: String,
    pub name: String,
    pub image: String,
    pub kind: ItemKind,
    pub quantity: u32,
    /// Unit price in cents
    pub price: i64,
}

impl From<&OrderLine> for OrderItemPayload {
    fn from(line: &OrderLine) -> Self {
        Self {
            id: line.item_id.clone(),
            name: line.display_name.clone(),
            image: line.media_reference.clone(),
            kind: line.kind,
            quantity: line.quantity,
            price: line.unit_price,
        }
    }
}

/// Order-creation request (payment intent)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreateRequest {
    /// Charge amount in minor currency units
    pub amount: i64,
    pub buyer_id: String,
    pub buyer_name: String,
    pub buyer_email: String,
    pub order_number: String,
    pub items: Vec<OrderItemPayload>,
}

/// Credentials for initializing the hosted payment sheet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentSheetCredentials {
    pub payment_intent: String,
    pub ephemeral_key: String,
    pub customer: String,
}

/// Order-creation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreateResponse {
    /// Server-assigned order id (authoritative)
    pub order_id: String,
    pub payment_intent: String,
    pub ephemeral_key: String,
    pub customer: String,
}

impl OrderCreateResponse {
    pub fn credentials(&self) -> PaymentSheetCredentials {
        PaymentSheetCredentials {
            payment_intent: self.payment_intent.clone(),
            ephemeral_key: self.ephemeral_key.clone(),
            customer: self.customer.clone(),
        }
    }
}

// =============================================================================
// Order history DTOs
// =============================================================================

/// One line of a past order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PastOrderItem {
    pub item_id: String,
    pub item_name: String,
    pub quantity: u32,
    /// Decimal price as sent by the backend
    pub price: f64,
    #[serde(default)]
    pub item_image: Option<String>,
}

/// A completed order from the history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PastOrder {
    pub order_id: String,
    pub date: String,
    pub total: f64,
    pub items: Vec<PastOrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_search_applies_to_both_fields() {
        let query = CatalogQuery::new(2, 20)
            .with_search("Spring Gala")
            .with_photo_type(PhotoType::WithSibling);
        let pairs = query.query_pairs();

        assert!(pairs.contains(&("page", "2".to_string())));
        assert!(pairs.contains(&("limit", "20".to_string())));
        assert!(pairs.contains(&("event_name", "Spring Gala".to_string())));
        assert!(pairs.contains(&("student_name", "Spring Gala".to_string())));
        assert!(pairs.contains(&("photo_type", "with_sibling".to_string())));
    }

    #[test]
    fn test_query_pairs_minimal() {
        let pairs = CatalogQuery::new(1, 10).query_pairs();
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_gallery_photo_price_normalized_to_cents() {
        let photo = GalleryPhoto {
            id: "312".to_string(),
            event_name: "Spring Gala".to_string(),
            student_name: "Robin".to_string(),
            photo_type: PhotoType::Individual,
            image_url: "https://cdn.example/312.jpg".to_string(),
            price: 5.0,
            description: None,
        };
        let item = photo.into_item();
        assert_eq!(item.kind, ItemKind::DigitalPhoto);
        assert_eq!(item.unit_price, 500);
        assert_eq!(item.cart_item_id(), "photo:312");
    }

    #[test]
    fn test_paginated_response_total_pages() {
        let page = PaginatedResponse::<GalleryPhoto>::new(Vec::new(), 45, 1, 20);
        assert_eq!(page.total_pages(), 3);
        let single = PaginatedResponse::<GalleryPhoto>::new(Vec::new(), 5, 1, 0);
        assert_eq!(single.total_pages(), 1);
    }
}
