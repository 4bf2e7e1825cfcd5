//! snapclass-cart - Cart and order-composition engine
//!
//! Single source of truth for the shopping cart plus the checkout
//! session that bridges it to the order backend and the hosted payment
//! sheet. Cart mutations are synchronous against in-memory state with
//! fire-and-forget durable writes; network work happens only inside the
//! checkout session.

pub mod checkout;
pub mod pricing;
pub mod store;

pub use checkout::{
    BuyerIdentity, CheckoutError, CheckoutSession, CompletedCheckout, OrderApi, PaymentGateway,
    PaymentOutcome,
};
pub use pricing::CartTotals;
pub use store::{CartError, CartStore, CartStorage, StorageError};
