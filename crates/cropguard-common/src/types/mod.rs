//! Core data types for CropGuard

pub mod eligibility;
pub mod order;
pub mod premium;
pub mod region;
pub mod tariff;
