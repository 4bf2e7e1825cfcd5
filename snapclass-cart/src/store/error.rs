//! Cart store errors

use super::storage::StorageError;
use thiserror::Error;

/// Errors surfaced by cart mutations
#[derive(Debug, Error)]
pub enum CartError {
    /// The photo already appears in a completed order; re-purchasing a
    /// digital license is rejected before any mutation happens.
    #[error("photo {0} has already been purchased")]
    AlreadyPurchased(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type CartResult<T> = Result<T, CartError>;
