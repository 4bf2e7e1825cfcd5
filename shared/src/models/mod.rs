//! Data models
//!
//! Shared between the cart engine and the API client.
//! All monetary amounts are integer minor units (cents).

pub mod cart;
pub mod catalog;
pub mod order;

// Re-exports
pub use cart::*;
pub use catalog::*;
pub use order::*;
