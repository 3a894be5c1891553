//! Order total - premium plus GST

use cropguard_common::money::{parse_rupees, round_rupees};
use cropguard_common::{CropGuardError, InputError, OrderTotal, Result, GST_RATE};
use rust_decimal::Decimal;
use tracing::debug;

/// Add GST to a premium amount
///
/// GST is rounded to whole rupees; the base amount is kept as given.
pub fn compute_order_total(base_amount: Decimal) -> Result<OrderTotal> {
    if base_amount.is_sign_negative() && !base_amount.is_zero() {
        return Err(InputError::InvalidAmount(base_amount.to_string()).into());
    }

    let tax_amount = round_rupees(base_amount * GST_RATE);
    let total_amount = base_amount
        .checked_add(tax_amount)
        .ok_or_else(|| CropGuardError::from(InputError::InvalidAmount(base_amount.to_string())))?;

    debug!(%base_amount, %tax_amount, %total_amount, "Computed order total");

    Ok(OrderTotal {
        base_amount,
        tax_rate: GST_RATE,
        tax_amount,
        total_amount,
    })
}

/// Add GST to a displayed premium such as `₹1,200`
///
/// An unparseable amount is an error, never a zero total.
pub fn compute_order_total_from_display(display_amount: &str) -> Result<OrderTotal> {
    let base_amount = parse_rupees(display_amount)?;
    compute_order_total(base_amount)
}
