//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary values arrive as decimal strings and stay `Decimal` end to end,
//! so repeated add/remove cycles never drift.

use rust_decimal::prelude::*;
use shared::order::{DraftOrderHeader, LineSource, OrderLine};

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
pub const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to cents
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Maximum accepted unit price from a price list (1,000,000)
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Unit prices must be non-negative and at most [`MAX_UNIT_PRICE`]
pub fn validate_unit_price(unit_price: Decimal) -> Result<(), String> {
    if unit_price < Decimal::ZERO {
        return Err(format!("unit price must be non-negative, got {}", unit_price));
    }
    if unit_price > MAX_UNIT_PRICE {
        return Err(format!(
            "unit price exceeds maximum allowed ({}), got {}",
            MAX_UNIT_PRICE, unit_price
        ));
    }
    Ok(())
}

/// unit_price * quantity, rounded to cents; `None` on overflow
///
/// Line and order amounts are defined at cent precision: 0.125 x 1 is 0.13.
pub fn extended_price(unit_price: Decimal, quantity: i32) -> Option<Decimal> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .map(round_money)
}

/// Order total: sum of extended prices over PRICED lines
///
/// COVERED lines contribute nothing regardless of what they carry.
/// Saturates at `Decimal::MAX` (logged) instead of overflowing.
pub fn recompute_total(lines: &[OrderLine]) -> Decimal {
    let total = lines
        .iter()
        .filter(|l| l.source == LineSource::Priced)
        .try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.extended_price));
    match total {
        Some(total) => round_money(total),
        None => {
            tracing::error!(lines = lines.len(), "Order total overflowed");
            Decimal::MAX
        }
    }
}

/// Write the derived totals back into the header
///
/// `paid_amount` mirrors the total unless the order allows partial payment.
pub fn apply_totals(header: &mut DraftOrderHeader, lines: &[OrderLine]) {
    header.total_amount = recompute_total(lines);
    if !header.allows_partial_payment {
        header.paid_amount = header.total_amount;
    }
}
