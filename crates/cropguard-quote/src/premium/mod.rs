//! Premium module
//!
//! Crop rate × plan multiplier × area, less the government subsidy.

pub mod engine;

pub use engine::PremiumCalculator;
