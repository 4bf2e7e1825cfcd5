//! Catalog browser supersession tests

use async_trait::async_trait;
use shared::client::{CatalogQuery, GalleryPhoto, PaginatedResponse};
use snapclass_client::{CatalogBrowser, CatalogSource, ClientResult};
use std::sync::Arc;
use std::time::Duration;

/// Stub feed: queries searching for "slow" take 200ms, others resolve
/// immediately. Pages echo the requested page number.
struct StubFeed;

#[async_trait]
impl CatalogSource for StubFeed {
    async fn fetch(&self, query: &CatalogQuery) -> ClientResult<PaginatedResponse<GalleryPhoto>> {
        if query.search.as_deref() == Some("slow") {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        Ok(PaginatedResponse::new(Vec::new(), 0, query.page, query.limit))
    }
}

#[tokio::test]
async fn load_returns_requested_page() {
    let browser = CatalogBrowser::new(StubFeed);
    let page = browser.load(CatalogQuery::new(3, 20)).await.unwrap().unwrap();
    assert_eq!(page.page, 3);
    assert_eq!(page.limit, 20);
}

#[tokio::test]
async fn newer_load_supersedes_slow_one() {
    let browser = Arc::new(CatalogBrowser::new(StubFeed));

    let slow_browser = browser.clone();
    let slow = tokio::spawn(async move {
        slow_browser
            .load(CatalogQuery::new(1, 20).with_search("slow"))
            .await
    });
    // Let the slow fetch get in flight before superseding it
    tokio::time::sleep(Duration::from_millis(50)).await;

    let fresh = browser.load(CatalogQuery::new(2, 20)).await.unwrap();
    assert_eq!(fresh.unwrap().page, 2);

    // The superseded fetch resolves to None instead of stale data
    let stale = slow.await.unwrap().unwrap();
    assert!(stale.is_none());
}

#[tokio::test]
async fn sequential_loads_all_complete() {
    let browser = CatalogBrowser::new(StubFeed);
    for page in 1..=3 {
        let result = browser.load(CatalogQuery::new(page, 10)).await.unwrap();
        assert_eq!(result.unwrap().page, page);
    }
}
