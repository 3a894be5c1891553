//! Premium calculator
//!
//! Combines the crop rate table, the plan table and the insured area:
//! - Sum insured from the plan's per-acre cover
//! - Gross premium from the crop rate and the plan multiplier
//! - Flat 50% government subsidy

use std::sync::Arc;

use cropguard_common::{
    CalculationInput, CalculationResult, CropGuardError, InputError, Result, Tariff, SUBSIDY_RATE,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, instrument};

/// Premium calculator over a shared, read-only tariff
#[derive(Debug, Clone)]
pub struct PremiumCalculator {
    tariff: Arc<Tariff>,
}

impl PremiumCalculator {
    pub fn new(tariff: Arc<Tariff>) -> Self {
        Self { tariff }
    }

    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Calculate the premium for `area_acres` of `crop_name` under `tier_name`
    #[instrument(skip(self))]
    pub fn compute_premium(
        &self,
        crop_name: &str,
        tier_name: &str,
        area_acres: Decimal,
    ) -> Result<CalculationResult> {
        let crop = self.tariff.crops.lookup(crop_name)?;
        let tier = self.tariff.plans.lookup(tier_name)?;

        if area_acres <= Decimal::ZERO {
            return Err(InputError::InvalidArea(area_acres.to_string()).into());
        }
        // Only an absurdly large area can overflow
        let too_large = || CropGuardError::from(InputError::InvalidArea(area_acres.to_string()));

        let sum_insured = tier
            .sum_insured_per_acre
            .checked_mul(area_acres)
            .ok_or_else(too_large)?;
        let base_premium = sum_insured
            .checked_mul(crop.rate_percent)
            .ok_or_else(too_large)?
            / dec!(100);
        let gross_premium = base_premium
            .checked_mul(tier.premium_multiplier)
            .ok_or_else(too_large)?;
        let subsidy_amount = gross_premium * SUBSIDY_RATE;
        let net_premium = gross_premium - subsidy_amount;

        debug!(
            crop = %crop.crop_name,
            tier = %tier.tier_name,
            %net_premium,
            "Computed premium"
        );

        Ok(CalculationResult {
            sum_insured,
            gross_premium,
            subsidy_amount,
            net_premium,
        })
    }

    /// Calculate the premium for a prepared input
    pub fn calculate(&self, input: &CalculationInput) -> Result<CalculationResult> {
        self.compute_premium(&input.crop_name, &input.tier_name, input.area_acres)
    }
}

impl Default for PremiumCalculator {
    fn default() -> Self {
        Self::new(Arc::new(Tariff::default()))
    }
}
