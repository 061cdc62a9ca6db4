//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored as REAL; every calculation converts to `Decimal`
//! first and rounds back to 2 decimal places (half-up) on the way out.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

/// Default tolerance when comparing a charged amount with price x quantity (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum unit price a line total is computed for
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum quantity per order or cart line
pub const MAX_QUANTITY: i32 = 9999;
/// Maximum amount a single checkout may charge
pub const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
///
/// NaN and values outside Decimal's range become zero, so callers bound
/// their input first.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

#[inline]
fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Expected total for `quantity` units at `unit_price`
///
/// `None` when the price is negative, not finite or above [`MAX_PRICE`].
pub fn line_total(unit_price: f64, quantity: i32) -> Option<Decimal> {
    if !(0.0..=MAX_PRICE).contains(&unit_price) {
        return None;
    }
    Decimal::from_f64(unit_price)?
        .checked_mul(Decimal::from(quantity))
        .map(round_money)
}

/// Per-unit price derived from a line total; `quantity` must be positive
pub fn unit_price_of(amount: f64, quantity: i32) -> f64 {
    to_f64(to_decimal(amount) / Decimal::from(quantity))
}

/// Whether two amounts agree within `tolerance`
///
/// A claimed amount that has no `Decimal` form never matches.
pub fn amounts_match(claimed: f64, expected: Decimal, tolerance: Decimal) -> bool {
    let Some(claimed) = Decimal::from_f64(claimed) else {
        return false;
    };
    round_money(claimed)
        .checked_sub(expected)
        .is_some_and(|diff| diff.abs() <= tolerance)
}
