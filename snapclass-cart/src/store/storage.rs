//! redb-based storage layer for the cart and checkout session
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `cart` | `"entries"` | `Vec<CartEntry>` (JSON) | Current cart contents |
//! | `checkout_session` | `"order_number"` | `&str` | Pending order number |
//!
//! Each slot has exactly one writer: the cart store owns the `cart`
//! table, the checkout session owns `checkout_session`.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`, so the database file is
//! always in a consistent state even if the app is killed mid-write.
//! The in-memory cart remains the authority for the running session; a
//! failed write only costs durability for mutations since the last
//! successful commit.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::CartEntry;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Cart slot: key = "entries", value = JSON-serialized Vec<CartEntry>
const CART_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("cart");

/// Checkout session slot: key = "order_number", value = order number string
const SESSION_TABLE: TableDefinition<&str, &str> = TableDefinition::new("checkout_session");

const ENTRIES_KEY: &str = "entries";
const ORDER_NUMBER_KEY: &str = "order_number";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Cart storage backed by redb
///
/// Cheap to clone; all clones share the same database handle.
#[derive(Clone)]
pub struct CartStorage {
    db: Arc<Database>,
}

impl CartStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create tables up-front so reads never hit a missing table
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CART_TABLE)?;
            let _ = write_txn.open_table(SESSION_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Cart Slot ==========

    /// Load the persisted entry list (empty if nothing was ever saved)
    pub fn load_entries(&self) -> StorageResult<Vec<CartEntry>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CART_TABLE)?;
        match table.get(ENTRIES_KEY)? {
            Some(guard) => Ok(serde_json::from_slice(guard.value())?),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the cart slot with the full entry list
    pub fn save_entries(&self, entries: &[CartEntry]) -> StorageResult<()> {
        let bytes = serde_json::to_vec(entries)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CART_TABLE)?;
            table.insert(ENTRIES_KEY, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Checkout Session Slot ==========

    /// Load the pending order number, if a checkout was in flight
    pub fn load_order_number(&self) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SESSION_TABLE)?;
        Ok(table
            .get(ORDER_NUMBER_KEY)?
            .map(|guard| guard.value().to_string()))
    }

    /// Persist the order number for the current checkout session
    pub fn save_order_number(&self, order_number: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSION_TABLE)?;
            table.insert(ORDER_NUMBER_KEY, order_number)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Drop the persisted order number (after a completed payment)
    pub fn clear_order_number(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSION_TABLE)?;
            table.remove(ORDER_NUMBER_KEY)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl std::fmt::Debug for CartStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStorage").finish_non_exhaustive()
    }
}
