//! snapclass-client - HTTP client for the snapclass shop backend
//!
//! Wraps the gallery feed, order creation and order history endpoints,
//! and implements the cart engine's [`OrderApi`](snapclass_cart::OrderApi)
//! port. The [`CatalogBrowser`] adds stale-fetch cancellation on top of
//! the raw feed so a slow earlier response can never overwrite fresher
//! results.

mod catalog;
mod client;
mod config;
mod error;
mod history;

pub use catalog::{CatalogBrowser, CatalogSource, shop_products};
pub use client::ShopClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use history::PurchasedPhotoRecord;
