//! Tariff tables - crop premium rates and plan tiers
//!
//! Both tables are built once, validated, and then only read. Lookups are
//! by trimmed, case-insensitive name. A plan tier also answers to its short
//! name, so `"Basic"` finds `"Basic Protection"`.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{CropGuardError, InputError, Result};

/// Suffix shared by the plan tier names
const TIER_SUFFIX: &str = " Protection";

/// Premium rate for a crop, as a percentage of the sum insured per season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRate {
    pub crop_name: String,
    pub rate_percent: Decimal,
}

impl CropRate {
    pub fn new(crop_name: impl Into<String>, rate_percent: Decimal) -> Self {
        Self {
            crop_name: crop_name.into(),
            rate_percent,
        }
    }
}

/// Plan tier: coverage per acre and the premium loading applied on top of the crop rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTier {
    pub tier_name: String,
    pub sum_insured_per_acre: Decimal,
    pub premium_multiplier: Decimal,
}

impl PlanTier {
    pub fn new(
        tier_name: impl Into<String>,
        sum_insured_per_acre: Decimal,
        premium_multiplier: Decimal,
    ) -> Self {
        Self {
            tier_name: tier_name.into(),
            sum_insured_per_acre,
            premium_multiplier,
        }
    }

    /// Tier name without the " Protection" suffix
    pub fn short_name(&self) -> &str {
        self.tier_name
            .strip_suffix(TIER_SUFFIX)
            .unwrap_or(&self.tier_name)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Crop name → premium rate
#[derive(Debug, Clone)]
pub struct RateTable {
    rates: Vec<CropRate>,
    index: HashMap<String, usize>,
}

impl RateTable {
    /// Build and validate a rate table
    pub fn from_rates(rates: Vec<CropRate>) -> Result<Self> {
        let mut index = HashMap::with_capacity(rates.len());

        for (i, rate) in rates.iter().enumerate() {
            let key = normalize(&rate.crop_name);
            if key.is_empty() {
                return Err(CropGuardError::Config("crop name must not be empty".into()));
            }
            if rate.rate_percent <= Decimal::ZERO || rate.rate_percent > dec!(100) {
                return Err(CropGuardError::Config(format!(
                    "rate for {} must be in (0, 100], got {}",
                    rate.crop_name, rate.rate_percent
                )));
            }
            if index.insert(key, i).is_some() {
                return Err(CropGuardError::Config(format!(
                    "duplicate crop: {}",
                    rate.crop_name
                )));
            }
        }

        Ok(Self { rates, index })
    }

    pub fn get(&self, crop_name: &str) -> Option<&CropRate> {
        self.index
            .get(&normalize(crop_name))
            .map(|&i| &self.rates[i])
    }

    /// Look up a crop, failing with `UnknownCrop`
    pub fn lookup(&self, crop_name: &str) -> Result<&CropRate> {
        self.get(crop_name)
            .ok_or_else(|| InputError::UnknownCrop(crop_name.to_string()).into())
    }

    /// Crops in table order
    pub fn iter(&self) -> impl Iterator<Item = &CropRate> {
        self.rates.iter()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::from_rates(vec![
            CropRate::new("Paddy", dec!(2)),
            CropRate::new("Wheat", dec!(1.5)),
            CropRate::new("Maize", dec!(2)),
            CropRate::new("Groundnut", dec!(5)),
            CropRate::new("Cotton", dec!(5)),
            CropRate::new("Jowar", dec!(2)),
            CropRate::new("Ragi", dec!(2)),
            CropRate::new("Sugarcane", dec!(5)),
        ])
        .expect("built-in crop rates are valid")
    }
}

/// Plan tier name → coverage and multiplier
#[derive(Debug, Clone)]
pub struct PlanTable {
    tiers: Vec<PlanTier>,
    index: HashMap<String, usize>,
}

impl PlanTable {
    /// Build and validate a plan table
    pub fn from_tiers(tiers: Vec<PlanTier>) -> Result<Self> {
        let mut index = HashMap::with_capacity(tiers.len() * 2);

        for (i, tier) in tiers.iter().enumerate() {
            let key = normalize(&tier.tier_name);
            if key.is_empty() {
                return Err(CropGuardError::Config("tier name must not be empty".into()));
            }
            if tier.sum_insured_per_acre <= Decimal::ZERO {
                return Err(CropGuardError::Config(format!(
                    "sum insured for {} must be positive",
                    tier.tier_name
                )));
            }
            if tier.premium_multiplier <= Decimal::ZERO {
                return Err(CropGuardError::Config(format!(
                    "multiplier for {} must be positive",
                    tier.tier_name
                )));
            }
            if index.insert(key, i).is_some() {
                return Err(CropGuardError::Config(format!(
                    "duplicate plan tier: {}",
                    tier.tier_name
                )));
            }
        }

        // Short names never shadow a full tier name
        for (i, tier) in tiers.iter().enumerate() {
            index.entry(normalize(tier.short_name())).or_insert(i);
        }

        Ok(Self { tiers, index })
    }

    pub fn get(&self, tier_name: &str) -> Option<&PlanTier> {
        self.index
            .get(&normalize(tier_name))
            .map(|&i| &self.tiers[i])
    }

    /// Look up a plan tier, failing with `UnknownPlan`
    pub fn lookup(&self, tier_name: &str) -> Result<&PlanTier> {
        self.get(tier_name)
            .ok_or_else(|| InputError::UnknownPlan(tier_name.to_string()).into())
    }

    /// Tiers in table order
    pub fn iter(&self) -> impl Iterator<Item = &PlanTier> {
        self.tiers.iter()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for PlanTable {
    fn default() -> Self {
        Self::from_tiers(vec![
            PlanTier::new("Basic Protection", dec!(50000), dec!(1)),
            PlanTier::new("Standard Protection", dec!(100000), dec!(1.2)),
            PlanTier::new("Comprehensive Protection", dec!(200000), dec!(1.5)),
        ])
        .expect("built-in plan tiers are valid")
    }
}

/// On-disk tariff layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TariffFile {
    crops: Vec<CropRate>,
    plans: Vec<PlanTier>,
}

/// Both lookup tables used by the premium calculator
#[derive(Debug, Clone, Default)]
pub struct Tariff {
    pub crops: RateTable,
    pub plans: PlanTable,
}

impl Tariff {
    pub fn new(crops: RateTable, plans: PlanTable) -> Self {
        Self { crops, plans }
    }

    /// Parse a tariff from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: TariffFile = serde_json::from_str(json)
            .map_err(|e| CropGuardError::Config(format!("Failed to parse tariff JSON: {}", e)))?;

        Ok(Self {
            crops: RateTable::from_rates(file.crops)?,
            plans: PlanTable::from_tiers(file.plans)?,
        })
    }

    /// Load a tariff from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CropGuardError::Config(format!(
                "Failed to read tariff file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }
}
