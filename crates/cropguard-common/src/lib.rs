//! # CropGuard Common
//!
//! Shared types, tariff tables, and errors for the CropGuard crop-insurance portal.
//!
//! ## Core Types
//!
//! - [`RateTable`]/[`PlanTable`]: static crop-rate and plan-tier lookups
//! - [`CalculationInput`]/[`CalculationResult`]: premium calculation types
//! - [`EligibilityChecklist`]: the five-item readiness self-attestation
//! - [`OrderTotal`]: payable amount with GST
//! - [`types::region`]: served states, their districts, and portal languages
//!
//! ## Money
//!
//! - [`money`]: rupee formatting with Indian digit grouping, and its parser

pub mod error;
pub mod money;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{CropGuardError, InputError, Result};
pub use types::{
    eligibility::{ChecklistItem, EligibilityChecklist, EligibilityReport},
    order::OrderTotal,
    premium::{CalculationInput, CalculationResult, PremiumQuote},
    region::{Language, Region},
    tariff::{CropRate, PlanTable, PlanTier, RateTable, Tariff},
};

use rust_decimal::Decimal;

/// Fraction of the gross premium covered by the government subsidy (50%)
pub const SUBSIDY_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// GST applied to the premium at checkout (18%)
pub const GST_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);
