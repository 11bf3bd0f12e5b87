//! Bill totals calculation using rust_decimal for precision
//!
//! All arithmetic is done in `Decimal`, then converted back to `f64` for
//! display/serialization. Inputs arrive pre-coerced by the lenient wire
//! parsing in `shared`, and the conversion here drops any remaining
//! non-finite value to zero, so these functions never panic on bad data.

use rust_decimal::prelude::*;
use shared::{BillTotals, LineItem, PaymentEntry, PaymentMethod};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for display, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Derive displayable bill totals from the billable item set
///
/// `net_total = subtotal_taxable + total_tax + additional_charges - discount`.
/// A negative net total is a pricing-data anomaly upstream and is returned
/// as-is, not clamped.
pub fn compute_totals(
    billable_items: &[LineItem],
    discount: f64,
    additional_charges: f64,
) -> BillTotals {
    let mut subtotal_taxable = Decimal::ZERO;
    let mut total_tax = Decimal::ZERO;
    for item in billable_items {
        subtotal_taxable += to_decimal(item.total_taxable);
        total_tax += to_decimal(item.total_tax);
    }

    let discount = to_decimal(discount);
    let additional_charges = to_decimal(additional_charges);
    let net_total = subtotal_taxable + total_tax + additional_charges - discount;

    BillTotals {
        subtotal_taxable: to_f64(subtotal_taxable),
        total_tax: to_f64(total_tax),
        discount: to_f64(discount),
        additional_charges: to_f64(additional_charges),
        net_total: to_f64(net_total),
    }
}

/// Change due on a cash payment
///
/// Takes the first cash entry (at most one is expected) and returns
/// `max(0, cash_amount - net_total)`.
pub fn compute_change(payments: &[PaymentEntry], net_total: f64) -> f64 {
    let Some(cash) = payments.iter().find(|p| p.method == PaymentMethod::Cash) else {
        return 0.0;
    };
    let change = to_decimal(cash.amount) - to_decimal(net_total);
    to_f64(change.max(Decimal::ZERO))
}
