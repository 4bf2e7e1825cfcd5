//! Pricing and summary calculator
//!
//! Pure functions over a cart entry slice. Totals are recomputed on
//! every query; the cart is bounded by human shopping behavior, so
//! there is nothing worth caching.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{CartEntry, CartSummary, ItemKind};
use shared::money;

/// Derived totals, all in cents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

/// Subtotal, tax and total for the given entries
pub fn totals(entries: &[CartEntry], tax_rate: Decimal) -> CartTotals {
    let subtotal: i64 = entries.iter().map(CartEntry::line_total).sum();
    let tax = money::tax_on(subtotal, tax_rate);
    CartTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Physical and digital quantity counts
pub fn summary(entries: &[CartEntry]) -> CartSummary {
    let mut counts = CartSummary::default();
    for entry in entries {
        match entry.kind {
            ItemKind::PhysicalProduct => counts.physical_count += entry.quantity,
            ItemKind::DigitalPhoto => counts.digital_count += entry.quantity,
        }
    }
    counts
}
