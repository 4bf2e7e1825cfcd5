//! Catalog access: gallery feed browsing and the static product list

use crate::client::ShopClient;
use crate::error::ClientResult;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::client::{CatalogQuery, GalleryPhoto, PaginatedResponse};
use shared::models::{ItemKind, PurchasableItem};
use tokio_util::sync::CancellationToken;

/// Source of gallery pages
///
/// Abstracted so the browser can be exercised against a stub in tests.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, query: &CatalogQuery) -> ClientResult<PaginatedResponse<GalleryPhoto>>;
}

#[async_trait]
impl CatalogSource for ShopClient {
    async fn fetch(&self, query: &CatalogQuery) -> ClientResult<PaginatedResponse<GalleryPhoto>> {
        self.fetch_photos(query).await
    }
}

/// Gallery browser with stale-fetch cancellation
///
/// Only the most recent `load` per browser is live: starting a new one
/// cancels the previous in-flight fetch, which resolves to `Ok(None)`.
/// A slow earlier response can therefore never overwrite fresher
/// results.
pub struct CatalogBrowser<S: CatalogSource> {
    source: S,
    current: Mutex<CancellationToken>,
}

impl<S: CatalogSource> CatalogBrowser<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: Mutex::new(CancellationToken::new()),
        }
    }

    /// Fetch a page, superseding any in-flight fetch
    ///
    /// Returns `Ok(None)` when this call was itself superseded before
    /// its response arrived; callers drop that result on the floor.
    pub async fn load(
        &self,
        query: CatalogQuery,
    ) -> ClientResult<Option<PaginatedResponse<GalleryPhoto>>> {
        let token = CancellationToken::new();
        let previous = {
            let mut current = self.current.lock();
            std::mem::replace(&mut *current, token.clone())
        };
        previous.cancel();

        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!(page = query.page, "gallery fetch superseded");
                Ok(None)
            }
            result = self.source.fetch(&query) => result.map(Some),
        }
    }
}

/// The static physical-product catalog
///
/// Products are bundled with the app rather than served by the backend;
/// prices are in cents.
pub fn shop_products() -> Vec<PurchasableItem> {
    let products = [
        ("mug", 1299, "Photo Mug", "Ceramic mug printed with your photo"),
        ("keyring", 650, "Photo Keyring", "Acrylic keyring with your photo"),
        ("frame", 1500, "Framed Print", "20x25cm framed print"),
        ("canvas", 2499, "Canvas Print", "30x40cm canvas print"),
        ("calendar", 1800, "Photo Calendar", "12-month calendar with your photo"),
    ];
    products
        .into_iter()
        .map(|(id, price, name, description)| PurchasableItem {
            id: id.to_string(),
            kind: ItemKind::PhysicalProduct,
            unit_price: price,
            display_name: name.to_string(),
            description: description.to_string(),
            media_reference: format!("assets/products/{id}.png"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_ids_unique() {
        let products = shop_products();
        let mut ids: Vec<_> = products.iter().map(|p| p.cart_item_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_products_are_physical() {
        for product in shop_products() {
            assert_eq!(product.kind, ItemKind::PhysicalProduct);
            assert!(product.unit_price > 0);
        }
    }
}
