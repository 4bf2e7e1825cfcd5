//! Checkout session state machine
//!
//! ```text
//! begin_checkout()            -> order number (generated once, persisted)
//! request_payment_intent()    -> frozen OrderSnapshot + gateway credentials
//! confirm_payment(creds)      -> Completed: clear cart, report digital lines
//!                                Cancelled/Failed: cart and snapshot untouched
//! ```
//!
//! Any failure leaves the cart intact and reuses the same order number
//! on retry. True idempotency is the backend's job; the client-side
//! number is a display token.

use super::{
    BuyerIdentity, CheckoutError, CompletedCheckout, OrderApi, PaymentGateway, PaymentOutcome,
};
use crate::pricing;
use crate::store::{CartStorage, CartStore};
use parking_lot::RwLock;
use rand::Rng;
use rust_decimal::Decimal;
use shared::client::{OrderCreateRequest, PaymentSheetCredentials};
use shared::models::{OrderLine, OrderSnapshot};
use shared::money::DEFAULT_TAX_RATE;
use shared::util::now_millis;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default order-number prefix
const DEFAULT_ORDER_PREFIX: &str = "SC";

/// Intent returned by the backend, held until the sheet resolves
struct PendingIntent {
    snapshot: OrderSnapshot,
    order_id: String,
}

/// Checkout session
///
/// One per app session, same lifetime as the cart store it wraps.
pub struct CheckoutSession {
    store: Arc<CartStore>,
    api: Arc<dyn OrderApi>,
    gateway: Arc<dyn PaymentGateway>,
    /// Same database as the cart, separate single-writer slot
    storage: CartStorage,
    order_prefix: String,
    tax_rate: Decimal,
    buyer: RwLock<Option<BuyerIdentity>>,
    order_number: RwLock<Option<String>>,
    /// Set on successful payment; the number stays visible for the
    /// confirmation screen but the next checkout mints a fresh one
    completed: AtomicBool,
    pending: RwLock<Option<PendingIntent>>,
}

impl CheckoutSession {
    /// Create a session, restoring a persisted order number if a
    /// checkout was interrupted by an app restart
    pub fn new(
        store: Arc<CartStore>,
        api: Arc<dyn OrderApi>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let storage = store.storage().clone();
        let order_number = match storage.load_order_number() {
            Ok(number) => {
                if let Some(n) = &number {
                    tracing::info!(order_number = %n, "restored pending checkout");
                }
                number
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load persisted order number");
                None
            }
        };
        Self {
            store,
            api,
            gateway,
            storage,
            order_prefix: DEFAULT_ORDER_PREFIX.to_string(),
            tax_rate: DEFAULT_TAX_RATE,
            buyer: RwLock::new(None),
            order_number: RwLock::new(order_number),
            completed: AtomicBool::new(false),
            pending: RwLock::new(None),
        }
    }

    /// Set the tax rate (fraction, e.g. 0.20)
    pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// Set the order-number prefix
    pub fn with_order_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.order_prefix = prefix.into();
        self
    }

    // ========== Buyer ==========

    pub fn set_buyer(&self, buyer: BuyerIdentity) {
        *self.buyer.write() = Some(buyer);
    }

    pub fn clear_buyer(&self) {
        *self.buyer.write() = None;
    }

    // ========== Order Number ==========

    /// Current order number, if a checkout has begun
    ///
    /// After a successful payment this keeps returning the completed
    /// order's number until the next checkout begins.
    pub fn order_number(&self) -> Option<String> {
        self.order_number.read().clone()
    }

    /// Lazily generate the order number for this checkout session
    ///
    /// Generated once and persisted, so an app restart mid-checkout
    /// reuses the same identifier instead of minting a duplicate. A
    /// number left over from a completed order is replaced.
    pub fn begin_checkout(&self) -> String {
        if self.completed.swap(false, Ordering::SeqCst) {
            *self.order_number.write() = None;
        }
        if let Some(number) = self.order_number.read().clone() {
            return number;
        }
        let number = format!(
            "{}-{}-{}",
            self.order_prefix,
            now_millis(),
            rand::thread_rng().gen_range(0..1000)
        );
        *self.order_number.write() = Some(number.clone());
        if let Err(e) = self.storage.save_order_number(&number) {
            tracing::warn!(error = %e, "failed to persist order number");
        }
        tracing::info!(order_number = %number, "checkout started");
        number
    }

    /// Abandon the current checkout and start fresh
    ///
    /// The next [`begin_checkout`](Self::begin_checkout) generates a new
    /// order number.
    pub fn reset(&self) {
        *self.order_number.write() = None;
        *self.pending.write() = None;
        self.completed.store(false, Ordering::SeqCst);
        if let Err(e) = self.storage.clear_order_number() {
            tracing::warn!(error = %e, "failed to clear order number slot");
        }
    }

    // ========== Payment ==========

    /// Freeze an order snapshot and request a payment intent
    ///
    /// Preconditions: a buyer session exists, the cart is non-empty and
    /// every physical entry has a photo bound. The cart is untouched on
    /// any failure; a retry reuses the same order number.
    pub async fn request_payment_intent(
        &self,
    ) -> Result<PaymentSheetCredentials, CheckoutError> {
        let buyer = self
            .buyer
            .read()
            .clone()
            .ok_or(CheckoutError::NotAuthenticated)?;

        let entries = self.store.list();
        if entries.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if let Some(entry) = entries.iter().find(|e| !e.is_checkout_ready()) {
            return Err(CheckoutError::IncompleteSelection(entry.item_id.clone()));
        }

        let order_number = self.begin_checkout();
        let totals = pricing::totals(&entries, self.tax_rate);
        let snapshot = OrderSnapshot {
            order_number: order_number.clone(),
            line_items: entries.iter().map(OrderLine::from).collect(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            created_at: now_millis(),
        };

        let request = OrderCreateRequest {
            amount: snapshot.total,
            buyer_id: buyer.id,
            buyer_name: buyer.name,
            buyer_email: buyer.email,
            order_number: order_number.clone(),
            items: snapshot.line_items.iter().map(Into::into).collect(),
        };

        tracing::info!(
            order_number = %order_number,
            amount = request.amount,
            items = request.items.len(),
            "requesting payment intent"
        );
        let response = self.api.create_order(&request).await?;

        let credentials = response.credentials();
        *self.pending.write() = Some(PendingIntent {
            snapshot,
            order_id: response.order_id,
        });
        Ok(credentials)
    }

    /// Present the payment sheet and finalize on success
    ///
    /// On success the cart is cleared and the persisted order-number
    /// slot released; the number itself stays visible until the next
    /// checkout begins. The returned [`CompletedCheckout`] carries the
    /// digital lines for the download prompt. On cancellation or
    /// gateway failure nothing is touched, so the user can retry.
    pub async fn confirm_payment(
        &self,
        credentials: &PaymentSheetCredentials,
    ) -> Result<CompletedCheckout, CheckoutError> {
        if self.pending.read().is_none() {
            return Err(CheckoutError::NoPendingIntent);
        }

        match self.gateway.present(credentials).await {
            PaymentOutcome::Completed => {
                let pending = self
                    .pending
                    .write()
                    .take()
                    .ok_or(CheckoutError::NoPendingIntent)?;
                let order_number = pending.snapshot.order_number.clone();
                let digital_items = pending.snapshot.digital_lines();

                self.store.clear();
                self.completed.store(true, Ordering::SeqCst);
                // Release only the persisted slot; a restart after a
                // completed order must not resurrect its number
                if let Err(e) = self.storage.clear_order_number() {
                    tracing::warn!(error = %e, "failed to clear order number slot");
                }

                tracing::info!(
                    order_number = %order_number,
                    order_id = %pending.order_id,
                    digital_items = digital_items.len(),
                    "payment completed"
                );
                Ok(CompletedCheckout {
                    order_number,
                    order_id: pending.order_id,
                    digital_items,
                })
            }
            PaymentOutcome::Cancelled => {
                tracing::debug!("payment sheet dismissed by user");
                Err(CheckoutError::UserCancelled)
            }
            PaymentOutcome::Failed(message) => {
                tracing::warn!(error = %message, "payment sheet reported failure");
                Err(CheckoutError::Gateway(message))
            }
        }
    }
}

impl std::fmt::Debug for CheckoutSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutSession")
            .field("order_number", &self.order_number.read())
            .finish_non_exhaustive()
    }
}
