//! 价格转换工具模块
//!
//! All cart and order arithmetic runs on integer cents; `rust_decimal`
//! is used at the single point where a fractional multiplication (tax)
//! has to be rounded back to a whole cent.

use rust_decimal::prelude::*;

/// Default tax rate (20%)
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Convert a decimal currency amount to cents (half-up)
///
/// # Examples
///
/// ```
/// use shared::money::to_cents;
///
/// assert_eq!(to_cents(12.50), 1250);
/// assert_eq!(to_cents(0.01), 1);
/// assert_eq!(to_cents(9.99), 999);
/// ```
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Convert cents back to a decimal currency amount
pub fn to_major(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Format cents as a currency string (euros)
///
/// # Examples
///
/// ```
/// use shared::money::format_cents;
///
/// assert_eq!(format_cents(1250), "12.50€");
/// assert_eq!(format_cents(5), "0.05€");
/// ```
pub fn format_cents(cents: i64) -> String {
    format!("{}.{:02}€", cents / 100, (cents % 100).abs())
}

/// Tax on a subtotal, in cents, rounded half-up to the nearest cent
pub fn tax_on(subtotal_cents: i64, rate: Decimal) -> i64 {
    let tax = Decimal::from(subtotal_cents) * rate;
    tax.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(12.50), 1250);
        assert_eq!(to_cents(0.01), 1);
        assert_eq!(to_cents(100.00), 10000);
        assert_eq!(to_cents(0.00), 0);
    }

    #[test]
    fn test_round_trip() {
        for price in [0.01, 0.99, 1.00, 12.50, 99.99, 100.00, 999.99] {
            let cents = to_cents(price);
            let back = to_major(cents);
            assert!((back - price).abs() < 0.001, "Failed for {}", price);
        }
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 24.98 * 0.20 = 4.996 -> 5.00
        assert_eq!(tax_on(2498, DEFAULT_TAX_RATE), 500);
        // 10.00 * 0.20 = 2.00 exact
        assert_eq!(tax_on(1000, DEFAULT_TAX_RATE), 200);
        // 0.01 * 0.20 = 0.002 -> 0.00
        assert_eq!(tax_on(1, DEFAULT_TAX_RATE), 0);
        assert_eq!(tax_on(0, DEFAULT_TAX_RATE), 0);
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1250), "12.50€");
        assert_eq!(format_cents(10000), "100.00€");
        assert_eq!(format_cents(1), "0.01€");
    }
}
