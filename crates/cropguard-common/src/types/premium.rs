//! Premium Types - Net = Gross - Subsidy
//!
//! ```text
//! SumInsured = PerAcreCover × Area
//! Gross      = SumInsured × CropRate% × PlanMultiplier
//! Subsidy    = Gross × 50%
//! Net        = Gross - Subsidy
//! ```
//!
//! [`CalculationResult`] keeps exact decimal values. Rounding to whole rupees
//! happens once, in [`CalculationResult::rounded`], on each monetary value.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::money::round_rupees;

/// One premium calculation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub crop_name: String,
    pub tier_name: String,
    pub area_acres: Decimal,
}

impl CalculationInput {
    /// Create an input, checking the area is positive
    ///
    /// Crop and tier names are checked against the tariff by the calculator.
    pub fn new(
        crop_name: impl Into<String>,
        tier_name: impl Into<String>,
        area_acres: Decimal,
    ) -> Result<Self> {
        if area_acres <= Decimal::ZERO {
            return Err(InputError::InvalidArea(area_acres.to_string()).into());
        }
        Ok(Self {
            crop_name: crop_name.into(),
            tier_name: tier_name.into(),
            area_acres,
        })
    }

    /// Create an input from the area as typed into a form
    pub fn parse(
        crop_name: impl Into<String>,
        tier_name: impl Into<String>,
        area_text: &str,
    ) -> Result<Self> {
        let area_acres = Decimal::from_str(area_text.trim())
            .map_err(|_| InputError::InvalidArea(area_text.to_string()))?;
        Self::new(crop_name, tier_name, area_acres)
    }
}

/// Exact result of a premium calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Maximum payout for the policy
    pub sum_insured: Decimal,
    /// Premium before subsidy
    pub gross_premium: Decimal,
    /// Government share of the gross premium
    pub subsidy_amount: Decimal,
    /// Farmer's payable premium
    pub net_premium: Decimal,
}

impl CalculationResult {
    /// Presentation values in whole rupees
    pub fn rounded(&self) -> PremiumQuote {
        PremiumQuote {
            sum_insured: round_rupees(self.sum_insured),
            gross_premium: round_rupees(self.gross_premium),
            subsidy_amount: round_rupees(self.subsidy_amount),
            net_premium: round_rupees(self.net_premium),
        }
    }
}

/// Premium as shown to the farmer
///
/// Every amount is in whole rupees. Gross, subsidy and net are each rounded
/// from their exact value, so on a half-rupee boundary `net` may differ from
/// `gross - subsidy` by one rupee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumQuote {
    pub sum_insured: Decimal,
    pub gross_premium: Decimal,
    pub subsidy_amount: Decimal,
    pub net_premium: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_area() {
        let input = CalculationInput::parse("Paddy", "Basic", " 2.5 ").unwrap();
        assert_eq!(input.area_acres, dec!(2.5));
    }

    #[test]
    fn test_rejects_bad_area() {
        assert!(CalculationInput::parse("Paddy", "Basic", "").is_err());
        assert!(CalculationInput::parse("Paddy", "Basic", "two").is_err());
        assert!(CalculationInput::parse("Paddy", "Basic", "0").is_err());
        assert!(CalculationInput::parse("Paddy", "Basic", "-1").is_err());
        assert!(CalculationInput::new("Paddy", "Basic", dec!(-0.5)).is_err());
    }

    #[test]
    fn test_rounding_each_value() {
        let exact = CalculationResult {
            sum_insured: dec!(50025),
            gross_premium: dec!(1000.5),
            subsidy_amount: dec!(500.25),
            net_premium: dec!(500.25),
        };

        let quote = exact.rounded();
        assert_eq!(quote.sum_insured, dec!(50025));
        assert_eq!(quote.gross_premium, dec!(1001));
        assert_eq!(quote.subsidy_amount, dec!(500));
        assert_eq!(quote.net_premium, dec!(500));
    }

    #[test]
    fn test_sum_insured_is_whole_rupees() {
        let exact = CalculationResult {
            sum_insured: dec!(6172.50000),
            gross_premium: dec!(123.45),
            subsidy_amount: dec!(61.725),
            net_premium: dec!(61.725),
        };

        let quote = exact.rounded();
        assert_eq!(quote.sum_insured, dec!(6173));
        assert_eq!(quote.sum_insured.scale(), 0);
        assert_eq!(quote.sum_insured.to_string(), "6173");

        let fractional_area = CalculationResult {
            sum_insured: dec!(125000.0),
            ..exact
        };
        assert_eq!(fractional_area.rounded().sum_insured.to_string(), "125000");
    }
}
