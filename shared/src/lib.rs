//! Shared types for the snapclass shop client
//!
//! Common types used across the cart engine and the API client:
//! data models, wire DTOs, money utilities and pagination types.

pub mod client;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::PaginatedResponse;
pub use models::{BoundPhoto, CartEntry, CartSummary, ItemKind, PurchasableItem};
