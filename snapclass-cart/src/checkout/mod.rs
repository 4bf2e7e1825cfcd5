//! Checkout session - bridges the cart to the order backend and the
//! hosted payment sheet
//!
//! The two external collaborators are modeled as ports:
//! [`OrderApi`] (remote order creation) and [`PaymentGateway`] (the
//! payment-sheet SDK). The session treats both as black boxes and owns
//! the order-number slot in durable storage.

mod session;

pub use session::CheckoutSession;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::client::{OrderCreateRequest, OrderCreateResponse, PaymentSheetCredentials};
use shared::models::OrderLine;
use thiserror::Error;

pub use shared::client::BuyerIdentity;

/// Checkout errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No buyer session exists
    #[error("not authenticated")]
    NotAuthenticated,

    /// Transport-level failure, no usable response
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status
    #[error("server rejected order ({status}): {message}")]
    ServerRejected { status: u16, message: String },

    /// Nothing to pay for
    #[error("cart is empty")]
    EmptyCart,

    /// A physical product entry has no photo bound to it yet
    #[error("item {0} has no photo selected")]
    IncompleteSelection(String),

    /// `confirm_payment` was called before `request_payment_intent`
    #[error("no payment intent has been requested")]
    NoPendingIntent,

    /// The payment sheet reported a failure
    #[error("payment failed: {0}")]
    Gateway(String),

    /// The payment sheet was dismissed without completing
    #[error("payment cancelled")]
    UserCancelled,
}

/// Remote order-creation endpoint
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn create_order(
        &self,
        request: &OrderCreateRequest,
    ) -> Result<OrderCreateResponse, CheckoutError>;
}

/// Result of presenting the payment sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Completed,
    Cancelled,
    Failed(String),
}

/// Hosted payment-sheet SDK
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Initialize the sheet with the given credentials and present it
    async fn present(&self, credentials: &PaymentSheetCredentials) -> PaymentOutcome;
}

/// Outcome of a successful checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletedCheckout {
    /// Client-generated display identifier
    pub order_number: String,
    /// Server-assigned order id (authoritative)
    pub order_id: String,
    /// Digital photo lines, for the post-payment download prompt
    pub digital_items: Vec<OrderLine>,
}
