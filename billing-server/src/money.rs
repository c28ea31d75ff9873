//! Money rounding at the display/persistence edge
//!
//! The calculator works in `f64` end to end. Figures are rounded exactly once,
//! when they leave the engine (payload, print, UI), each one independently.
//! Rounding goes through `Decimal` so the half-way rule is applied to the
//! decimal digits rather than to a binary approximation of them.

use rust_decimal::prelude::*;

/// Rounding precision for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal (NaN/Infinity/out-of-range become zero)
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Finite value whose magnitude is past what `Decimal` can hold (~7.9e28).
///
/// Every `f64` that large is already a whole number, so it has no cents to
/// round and is passed through as-is.
#[inline]
fn beyond_decimal(value: f64) -> bool {
    value.is_finite() && Decimal::from_f64(value).is_none()
}

/// Round to 2 decimal places as a Decimal
#[inline]
pub fn to_money(value: f64) -> Decimal {
    to_decimal(value).round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to 2 decimal places, back to f64 for serialization
#[inline]
pub fn round_money(value: f64) -> f64 {
    if beyond_decimal(value) {
        return value;
    }
    to_money(value).to_f64().unwrap_or_default()
}

/// Format with exactly two decimals (`1230` -> `"1230.00"`)
pub fn format_money(value: f64) -> String {
    if beyond_decimal(value) {
        return format!("{value:.2}");
    }
    let mut amount = to_money(value);
    amount.rescale(DECIMAL_PLACES);
    if amount.is_zero() {
        // avoid "-0.00"
        amount.set_sign_positive(true);
    }
    amount.to_string()
}

/// Check if two monetary values are equal within tolerance
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
