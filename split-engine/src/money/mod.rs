//! Money calculation utilities using rust_decimal for precision
//!
//! Prices enter as `f64` (as persisted), are validated and rounded to 2
//! decimal places at the boundary, and every sum, product and division runs
//! on `Decimal`. Results convert back to `f64` only for storage.

use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::OrderItem;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Upper bound for any menu price
pub const MAX_PRICE: f64 = 99_999.99;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Validate and round a price.
///
/// `allow_zero` admits 0.00 (course dishes without surcharge); otherwise the
/// price must be strictly positive.
pub fn validate_price(value: f64, allow_zero: bool) -> AppResult<f64> {
    if !value.is_finite() {
        return Err(AppError::invalid_price(format!(
            "price must be a finite number, got {}",
            value
        )));
    }
    let rounded = to_f64(to_decimal(value));
    if rounded < 0.0 || (!allow_zero && rounded == 0.0) {
        let bound = if allow_zero { "non-negative" } else { "positive" };
        return Err(AppError::invalid_price(format!("price must be {bound}, got {value}"))
            .with_detail("min_inclusive", allow_zero));
    }
    if rounded > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("price exceeds maximum allowed ({}), got {}", MAX_PRICE, value),
        ));
    }
    Ok(rounded)
}

/// Parse a user-entered price ("12.5", " 3 ") and validate it
pub fn parse_price(input: &str, allow_zero: bool) -> AppResult<f64> {
    let trimmed = input.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        AppError::invalid_price(format!("'{}' is not a valid price", trimmed))
    })?;
    validate_price(value, allow_zero)
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated at the boundary. A non-finite value
/// is logged and treated as zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round to cents, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `cost * quantity` for one order line
pub fn line_total(item: &OrderItem) -> Decimal {
    to_decimal(item.cost) * Decimal::from(item.quantity)
}

/// Sum of line totals
pub fn lines_total<'a>(items: impl IntoIterator<Item = &'a OrderItem>) -> Decimal {
    items.into_iter().map(line_total).sum()
}

/// Display form: `$12.34`
pub fn format_money(value: Decimal) -> String {
    format!("${:.2}", round_money(value))
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < MONEY_TOLERANCE
}
