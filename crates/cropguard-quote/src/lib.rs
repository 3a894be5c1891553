//! # CropGuard Quote
//!
//! Premium estimation, eligibility checking, and checkout totals.
//!
//! ## Premium Formula
//!
//! ```text
//! Net = S × r × m × (1 - s)
//! ```
//!
//! Where:
//! - S: Sum insured (plan cover per acre × area)
//! - r: Crop premium rate (percent of sum insured per season)
//! - m: Plan multiplier
//! - s: Government subsidy rate (50%)
//!
//! Every calculation is a pure function of its input and the tariff, which is
//! loaded once and shared read-only.

pub mod eligibility;
pub mod order;
pub mod premium;

use std::path::PathBuf;
use std::sync::Arc;

use cropguard_common::{
    CalculationInput, CalculationResult, EligibilityChecklist, EligibilityReport, OrderTotal,
    Result, Tariff,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use eligibility::{eligibility_report, evaluate_eligibility};
pub use order::{compute_order_total, compute_order_total_from_display};
pub use premium::PremiumCalculator;

/// Quote configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// JSON tariff file; the built-in tariff is used when unset
    pub tariff_path: Option<PathBuf>,
}

/// Quote service
#[derive(Debug, Clone)]
pub struct QuoteService {
    calculator: PremiumCalculator,
}

impl QuoteService {
    pub fn new(tariff: Arc<Tariff>) -> Self {
        Self {
            calculator: PremiumCalculator::new(tariff),
        }
    }

    /// Build the service, loading the tariff named in the config
    pub fn from_config(config: &QuoteConfig) -> Result<Self> {
        let tariff = match &config.tariff_path {
            Some(path) => {
                let tariff = Tariff::from_file(path)?;
                info!(
                    path = %path.display(),
                    crops = tariff.crops.len(),
                    plans = tariff.plans.len(),
                    "Loaded tariff"
                );
                tariff
            }
            None => Tariff::default(),
        };
        Ok(Self::new(Arc::new(tariff)))
    }

    pub fn tariff(&self) -> &Tariff {
        self.calculator.tariff()
    }

    /// Calculate a premium
    pub fn premium(
        &self,
        crop_name: &str,
        tier_name: &str,
        area_acres: Decimal,
    ) -> Result<CalculationResult> {
        self.calculator
            .compute_premium(crop_name, tier_name, area_acres)
    }

    /// Calculate a premium for a prepared input
    pub fn premium_for(&self, input: &CalculationInput) -> Result<CalculationResult> {
        self.calculator.calculate(input)
    }

    /// Check eligibility
    pub fn eligibility(&self, checklist: &EligibilityChecklist) -> EligibilityReport {
        eligibility_report(checklist)
    }

    /// Total payable for a premium
    pub fn order_total(&self, base_amount: Decimal) -> Result<OrderTotal> {
        compute_order_total(base_amount)
    }
}

impl Default for QuoteService {
    fn default() -> Self {
        Self::new(Arc::new(Tariff::default()))
    }
}
