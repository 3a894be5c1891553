//! Rupee amounts as displayed to farmers
//!
//! Amounts are shown in whole rupees with Indian digit grouping: the last
//! three digits form one group and every group above it has two digits
//! (`₹1,00,000` rather than `₹100,000`).

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CropGuardError, InputError, Result};

/// Rupee sign used in display strings
pub const RUPEE_SIGN: char = '₹';

/// Round to the nearest whole rupee, halves away from zero
pub fn round_rupees(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as whole rupees, e.g. `₹1,00,000`
pub fn format_rupees(amount: Decimal) -> String {
    let rounded = round_rupees(amount);
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_indian(&digits);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{}", RUPEE_SIGN, grouped)
    } else {
        format!("{}{}", RUPEE_SIGN, grouped)
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Parse a displayed rupee amount such as `₹1,200`, `Rs. 1,00,000` or `750.50`
///
/// Currency markers, thousands separators and whitespace are ignored.
pub fn parse_rupees(text: &str) -> Result<Decimal> {
    let invalid = || CropGuardError::from(InputError::InvalidAmount(text.to_string()));

    let mut rest = text.trim();
    for prefix in ["₹", "Rs.", "RS.", "rs.", "Rs", "RS", "rs", "INR", "inr"] {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped;
            break;
        }
    }

    let cleaned: String = rest
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Err(invalid());
    }

    Decimal::from_str(&cleaned).map_err(|_| invalid())
}
