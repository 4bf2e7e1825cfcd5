use super::*;
use crate::pricing;
use shared::models::{ItemKind, PurchasableItem};
use shared::money::DEFAULT_TAX_RATE;

fn test_store() -> CartStore {
    CartStore::with_storage(CartStorage::open_in_memory().unwrap()).unwrap()
}

fn product(id: &str, price: i64) -> PurchasableItem {
    PurchasableItem {
        id: id.to_string(),
        kind: ItemKind::PhysicalProduct,
        unit_price: price,
        display_name: format!("Product {id}"),
        description: "A printed keepsake".to_string(),
        media_reference: format!("assets/products/{id}.png"),
    }
}

fn photo(id: &str, price: i64) -> PurchasableItem {
    PurchasableItem {
        id: id.to_string(),
        kind: ItemKind::DigitalPhoto,
        unit_price: price,
        display_name: "Spring Gala".to_string(),
        description: String::new(),
        media_reference: format!("https://cdn.example/photos/{id}.jpg"),
    }
}

#[test]
fn test_add_distinct_products() {
    let store = test_store();
    store.add_item(&product("p1", 999)).unwrap();
    store.add_item(&product("p2", 1500)).unwrap();
    store.add_item(&product("p1", 999)).unwrap();
    store.add_item(&product("p1", 999)).unwrap();

    let entries = store.list();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].item_id, "product:p1");
    assert_eq!(entries[0].quantity, 3);
    assert_eq!(entries[1].quantity, 1);
}

#[test]
fn test_readd_product_increments_not_duplicates() {
    let store = test_store();
    store.add_item(&product("p1", 999)).unwrap();
    store.add_item(&product("p1", 999)).unwrap();

    let entries = store.list();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].quantity, 2);
}

#[test]
fn test_readd_photo_is_idempotent() {
    let store = test_store();
    store.add_item(&photo("d1", 500)).unwrap();
    store.add_item(&photo("d1", 500)).unwrap();

    let entries = store.list();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].quantity, 1);
}

#[test]
fn test_photo_and_product_ids_do_not_collide() {
    // Same raw id in both namespaces must yield two entries
    let store = test_store();
    store.add_item(&photo("7", 500)).unwrap();
    store.add_item(&product("7", 999)).unwrap();

    let entries = store.list();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].item_id, "photo:7");
    assert_eq!(entries[1].item_id, "product:7");
}

#[test]
fn test_update_quantity_zero_removes() {
    let store = test_store();
    store.add_item(&product("p1", 999)).unwrap();
    store.update_quantity("product:p1", 0);
    assert!(store.list().is_empty());

    store.add_item(&product("p1", 999)).unwrap();
    store.update_quantity("product:p1", -3);
    assert!(store.list().is_empty());
}

#[test]
fn test_update_quantity_pinned_for_photos() {
    let store = test_store();
    store.add_item(&photo("d1", 500)).unwrap();
    store.update_quantity("photo:d1", 5);
    assert_eq!(store.list()[0].quantity, 1);
}

#[test]
fn test_remove_absent_is_noop() {
    let store = test_store();
    store.add_item(&product("p1", 999)).unwrap();
    store.remove_item("product:nope");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_bind_photo_only_on_products() {
    let store = test_store();
    store.add_item(&product("p1", 999)).unwrap();
    store.add_item(&photo("d1", 500)).unwrap();

    // Wrong kind: silently ignored
    store.bind_photo("photo:d1", "d1", "https://cdn.example/d1.jpg");
    assert!(store.list()[1].bound_photo.is_none());

    // Absent entry: silently ignored
    store.bind_photo("product:nope", "d1", "https://cdn.example/d1.jpg");

    store.bind_photo("product:p1", "d1", "https://cdn.example/d1.jpg");
    let bound = store.list()[0].bound_photo.clone().unwrap();
    assert_eq!(bound.photo_id, "d1");
    assert!(store.list()[0].is_checkout_ready());
}

#[test]
fn test_checkout_ready_gate() {
    let store = test_store();
    store.add_item(&product("p1", 999)).unwrap();
    store.add_item(&photo("d1", 500)).unwrap();

    let entries = store.list();
    // Product with no bound photo is not ready; photos always are
    assert!(!entries[0].is_checkout_ready());
    assert!(entries[1].is_checkout_ready());
}

#[test]
fn test_already_purchased_rejected() {
    let store = test_store();
    store.set_purchased_photos(["d1".to_string()].into());

    let err = store.add_item(&photo("d1", 500)).unwrap_err();
    assert!(matches!(err, CartError::AlreadyPurchased(id) if id == "d1"));
    assert!(store.list().is_empty());

    // Other photos unaffected
    store.add_item(&photo("d2", 500)).unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn test_clear_empties_cart_and_summary() {
    let store = test_store();
    store.add_item(&product("p1", 999)).unwrap();
    store.add_item(&photo("d1", 500)).unwrap();
    store.clear();

    assert!(store.list().is_empty());
    let s = pricing::summary(&store.list());
    assert_eq!(s.physical_count, 0);
    assert_eq!(s.digital_count, 0);
}

#[test]
fn test_persistence_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.redb");

    let before = {
        let store = CartStore::open(&path).unwrap();
        store.add_item(&product("p1", 1999)).unwrap();
        store.add_item(&product("p1", 1999)).unwrap();
        store.add_item(&photo("d5", 500)).unwrap();
        store.bind_photo("product:p1", "d5", "https://cdn.example/d5.jpg");
        store.flush().unwrap();
        store.list()
    };

    // Simulated restart
    let store = CartStore::open(&path).unwrap();
    let after = store.list();
    assert_eq!(after, before);
    assert_eq!(after[0].item_id, "product:p1");
    assert_eq!(after[0].quantity, 2);
    assert_eq!(after[0].bound_photo.as_ref().unwrap().photo_id, "d5");
    assert_eq!(after[1].item_id, "photo:d5");
}

#[test]
fn test_shopping_scenario() {
    let store = test_store();
    store.add_item(&product("p1", 1999)).unwrap();
    store.add_item(&photo("d5", 500)).unwrap();

    // bind_photo on a digital photo entry is a no-op (wrong kind)
    store.bind_photo("photo:d5", "d5", "https://cdn.example/d5.jpg");
    store.update_quantity("product:p1", 3);

    let entries = store.list();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].item_id, "product:p1");
    assert_eq!(entries[0].quantity, 3);
    assert_eq!(entries[0].unit_price, 1999);
    assert_eq!(entries[1].item_id, "photo:d5");
    assert_eq!(entries[1].quantity, 1);
    assert_eq!(entries[1].unit_price, 500);
    assert!(entries[1].bound_photo.is_none());

    let t = pricing::totals(&entries, DEFAULT_TAX_RATE);
    assert_eq!(t.subtotal, 6497);
}

#[test]
fn test_stale_snapshot_cannot_overwrite_newer_one() {
    use parking_lot::Mutex;

    let storage = CartStorage::open_in_memory().unwrap();
    let last_committed = Mutex::new(0);

    // Snapshot 1: p1 added; snapshot 2: p1 removed again
    let older = vec![shared::models::CartEntry::from_item(&product("p1", 999))];
    let newer: Vec<shared::models::CartEntry> = Vec::new();

    // The newer snapshot wins the race to the blocking pool and commits
    // first; the older one arrives late and must be dropped
    commit_snapshot(&storage, &last_committed, &newer, 2);
    commit_snapshot(&storage, &last_committed, &older, 1);

    assert_eq!(storage.load_entries().unwrap(), newer);
    assert_eq!(*last_committed.lock(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rapid_mutations_persist_final_state() {
    let storage = CartStorage::open_in_memory().unwrap();
    let store = CartStore::with_storage(storage.clone()).unwrap();

    // Rapid add/remove churn; each mutation schedules its own write
    for _ in 0..20 {
        store.add_item(&product("p1", 999)).unwrap();
        store.remove_item("product:p1");
    }
    store.add_item(&product("p2", 1500)).unwrap();
    store.flush().unwrap();

    // Any write still in flight carries an older sequence and is
    // skipped; the durable state stays at the final cart
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let persisted = storage.load_entries().unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].item_id, "product:p2");
}

#[test]
fn test_price_snapshotted_at_add_time() {
    let store = test_store();
    store.add_item(&product("p1", 999)).unwrap();
    // Catalog price changed; re-add must not retroactively reprice
    store.add_item(&product("p1", 1299)).unwrap();

    let entries = store.list();
    assert_eq!(entries[0].quantity, 2);
    assert_eq!(entries[0].unit_price, 999);
}
