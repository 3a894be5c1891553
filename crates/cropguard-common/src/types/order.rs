//! Order total - premium plus GST at checkout

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::format_rupees;

/// Payable amount for a premium
///
/// `tax_amount` is whole rupees; `total_amount = base_amount + tax_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotal {
    pub base_amount: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

impl OrderTotal {
    /// Total as shown on the pay button, e.g. `₹1,416`
    pub fn display_total(&self) -> String {
        format_rupees(self.total_amount)
    }

    /// GST line as shown in the order summary
    pub fn display_tax(&self) -> String {
        format_rupees(self.tax_amount)
    }
}
