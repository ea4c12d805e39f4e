//! Money and tax calculation.
//!
//! Totals are derived from the line items at generation time, never read
//! from a stored field. Tax is rounded half-up to two decimals exactly
//! once, when the tax amount is computed; everything downstream displays
//! already-rounded figures.

use crate::model::LineItem;
use crate::policy::DocumentPolicy;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half-up (away from zero at the midpoint) to two decimals.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Derived monetary summary of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
}

/// Computes the document totals under the given policy. An empty item
/// list is a valid document and yields all-zero totals. Zero or negative
/// inputs propagate arithmetically; validity is an upstream concern.
pub fn compute_totals(items: &[LineItem], tax_rate_percent: Decimal, policy: &DocumentPolicy) -> Totals {
    let subtotal: Decimal = items.iter().map(|item| item.line_total).sum();
    if policy.itemizes_tax {
        let tax_amount = round2(subtotal * tax_rate_percent / Decimal::from(100));
        Totals { subtotal, tax_amount, grand_total: subtotal + tax_amount }
    } else {
        Totals { subtotal, tax_amount: Decimal::ZERO, grand_total: subtotal }
    }
}
