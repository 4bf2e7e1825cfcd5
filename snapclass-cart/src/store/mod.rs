//! CartStore - single source of truth for the current cart
//!
//! All reads and writes of cart state go through this store. Mutations
//! are synchronous read-modify-write against the in-memory entry list;
//! every mutation then schedules a fire-and-forget write of the full
//! list to the durable cart slot.
//!
//! # Mutation Flow
//!
//! ```text
//! add_item / remove_item / update_quantity / bind_photo / clear
//!     ├─ 1. Purchased-photo guard (add only)
//!     ├─ 2. Mutate in-memory entries under the write lock
//!     └─ 3. Schedule background persistence of the full list
//! ```
//!
//! A failed persistence write is logged and never rolls back memory:
//! the in-memory state stays authoritative for the running session.
//! Snapshots are sequence-tagged and commits serialized, so a write
//! that lost the race to a newer snapshot is dropped instead of
//! leaving older state durable.

mod error;
mod storage;

pub use error::{CartError, CartResult};
pub use storage::{CartStorage, StorageError, StorageResult};

use parking_lot::{Mutex, RwLock};
use shared::models::{CartEntry, ItemKind, PurchasableItem};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cart store
///
/// One instance per app session, passed by `Arc` to whichever screen
/// needs it. Entry order is insertion order and survives restarts.
pub struct CartStore {
    entries: RwLock<Vec<CartEntry>>,
    /// Photo ids that already appear in a completed order
    purchased: RwLock<HashSet<String>>,
    storage: CartStorage,
    /// Sequence assigned to each snapshot (captured under the entries lock)
    persist_seq: AtomicU64,
    /// Sequence of the newest snapshot committed to disk
    last_committed: Arc<Mutex<u64>>,
}

impl CartStore {
    /// Open the store, reloading any persisted cart from disk
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::with_storage(CartStorage::open(path)?)
    }

    /// Build the store on an already-open storage handle
    pub fn with_storage(storage: CartStorage) -> StorageResult<Self> {
        let entries = storage.load_entries()?;
        if !entries.is_empty() {
            tracing::info!(count = entries.len(), "restored persisted cart");
        }
        Ok(Self {
            entries: RwLock::new(entries),
            purchased: RwLock::new(HashSet::new()),
            storage,
            persist_seq: AtomicU64::new(0),
            last_committed: Arc::new(Mutex::new(0)),
        })
    }

    /// Storage handle, shared with the checkout session
    pub fn storage(&self) -> &CartStorage {
        &self.storage
    }

    // ========== Purchased-Photo Record ==========

    /// Replace the purchased-photo record (derived from order history)
    pub fn set_purchased_photos(&self, photo_ids: HashSet<String>) {
        *self.purchased.write() = photo_ids;
    }

    /// Whether this photo id already appears in a completed order
    pub fn is_purchased(&self, photo_id: &str) -> bool {
        self.purchased.read().contains(photo_id)
    }

    // ========== Mutations ==========

    /// Add a catalog item to the cart
    ///
    /// Re-adding a physical product increments its quantity; re-adding a
    /// digital photo is idempotent (a license is single-unit). Adding an
    /// already-purchased photo fails with [`CartError::AlreadyPurchased`]
    /// and mutates nothing.
    pub fn add_item(&self, item: &PurchasableItem) -> CartResult<()> {
        if item.kind == ItemKind::DigitalPhoto && self.is_purchased(&item.id) {
            return Err(CartError::AlreadyPurchased(item.id.clone()));
        }

        let item_id = item.cart_item_id();
        {
            let mut entries = self.entries.write();
            match entries.iter_mut().find(|e| e.item_id == item_id) {
                Some(entry) => match entry.kind {
                    ItemKind::PhysicalProduct => entry.quantity += 1,
                    // Second add of the same photo is a no-op
                    ItemKind::DigitalPhoto => return Ok(()),
                },
                None => entries.push(CartEntry::from_item(item)),
            }
        }
        self.schedule_persist();
        Ok(())
    }

    /// Remove an entry; no-op if absent
    pub fn remove_item(&self, item_id: &str) {
        let removed = {
            let mut entries = self.entries.write();
            let before = entries.len();
            entries.retain(|e| e.item_id != item_id);
            entries.len() != before
        };
        if removed {
            self.schedule_persist();
        }
    }

    /// Set the quantity of a physical product entry
    ///
    /// A quantity of zero or below removes the entry. Digital photo
    /// quantities are pinned to 1; updates against them are ignored.
    pub fn update_quantity(&self, item_id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(item_id);
            return;
        }
        let changed = {
            let mut entries = self.entries.write();
            match entries.iter_mut().find(|e| e.item_id == item_id) {
                Some(entry) if entry.kind == ItemKind::PhysicalProduct => {
                    entry.quantity = quantity as u32;
                    true
                }
                Some(_) => {
                    tracing::debug!(item_id, "quantity update ignored for digital photo");
                    false
                }
                None => false,
            }
        };
        if changed {
            self.schedule_persist();
        }
    }

    /// Bind a photo to a physical product entry
    ///
    /// No-op if the entry is absent or is a digital photo.
    pub fn bind_photo(&self, item_id: &str, photo_id: &str, photo_uri: &str) {
        let changed = {
            let mut entries = self.entries.write();
            match entries.iter_mut().find(|e| e.item_id == item_id) {
                Some(entry) if entry.kind == ItemKind::PhysicalProduct => {
                    entry.bound_photo = Some(shared::models::BoundPhoto {
                        photo_id: photo_id.to_string(),
                        photo_uri: photo_uri.to_string(),
                    });
                    true
                }
                _ => false,
            }
        };
        if changed {
            self.schedule_persist();
        }
    }

    /// Empty the cart (used after a successful payment)
    pub fn clear(&self) {
        self.entries.write().clear();
        self.schedule_persist();
    }

    // ========== Queries ==========

    /// Current entries, in insertion order
    pub fn list(&self) -> Vec<CartEntry> {
        self.entries.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    // ========== Persistence ==========

    /// Write the current entry list to disk synchronously
    ///
    /// Mutations persist in the background; this is for app-suspend
    /// paths that want the write completed before returning. Any stale
    /// background snapshot still in flight is skipped afterwards.
    pub fn flush(&self) -> StorageResult<()> {
        let (entries, seq) = self.snapshot();
        let mut committed = self.last_committed.lock();
        self.storage.save_entries(&entries)?;
        *committed = seq.max(*committed);
        Ok(())
    }

    /// Clone the entry list and tag it with a fresh sequence number
    ///
    /// Both happen under the entries lock, so a later mutation always
    /// produces a strictly later sequence.
    fn snapshot(&self) -> (Vec<CartEntry>, u64) {
        let entries = self.entries.read();
        let seq = self.persist_seq.fetch_add(1, Ordering::SeqCst) + 1;
        (entries.clone(), seq)
    }

    /// Schedule a background write of the full entry list
    ///
    /// Runs on the tokio blocking pool when a runtime is present, falls
    /// back to an inline write otherwise. Failures are logged only; the
    /// in-memory state is not rolled back.
    fn schedule_persist(&self) {
        let (entries, seq) = self.snapshot();
        let storage = self.storage.clone();
        let last_committed = self.last_committed.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || {
                    commit_snapshot(&storage, &last_committed, &entries, seq);
                });
            }
            Err(_) => commit_snapshot(&self.storage, &self.last_committed, &entries, seq),
        }
    }
}

/// Commit a snapshot unless a newer one is already durable
///
/// `last_committed` serializes commits across blocking-pool threads; a
/// snapshot that arrives after a newer one has committed is dropped so
/// rapid mutations can never leave older state on disk.
fn commit_snapshot(
    storage: &CartStorage,
    last_committed: &Mutex<u64>,
    entries: &[CartEntry],
    seq: u64,
) {
    let mut committed = last_committed.lock();
    if seq <= *committed {
        tracing::trace!(seq, committed = *committed, "skipping stale cart snapshot");
        return;
    }
    match storage.save_entries(entries) {
        Ok(()) => *committed = seq,
        Err(e) => tracing::warn!(error = %e, "cart persistence write failed"),
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("entries", &self.entries.read().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
