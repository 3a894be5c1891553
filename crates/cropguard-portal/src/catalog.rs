//! Plan catalog - the tiers on offer with their listed per-acre premium

use cropguard_common::money::format_rupees;
use cropguard_common::{InputError, PlanTable, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Listed per-acre premium, description and features, keyed by short tier name
const LISTINGS: [(&str, i64, &str, &str, &[&str]); 3] = [
    (
        "basic",
        750,
        "Essential coverage for small farmers",
        "1-3 acres",
        &[
            "Drought protection",
            "Flood damage coverage",
            "Pest attack coverage",
            "Basic claim support",
            "SMS alerts",
        ],
    ),
    (
        "standard",
        1200,
        "Comprehensive coverage for medium farmers",
        "3-10 acres",
        &[
            "All Basic features",
            "Weather-based coverage",
            "Disease protection",
            "Priority claim processing",
            "Dedicated Sahayak support",
            "Weather risk notifications",
        ],
    ),
    (
        "comprehensive",
        2500,
        "Maximum protection for large farmers",
        "10+ acres",
        &[
            "All Standard features",
            "Post-harvest loss coverage",
            "Market price protection",
            "Express claim settlement",
            "24/7 priority support",
            "Personal account manager",
            "Annual health checkup",
        ],
    ),
];

/// A plan as offered for purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOffer {
    pub tier_name: String,
    /// Sum insured per acre, e.g. `₹1,00,000`
    pub sum_insured: String,
    /// Listed premium per acre, e.g. `₹1,200`
    pub listed_premium: String,
    pub description: String,
    pub ideal_for: String,
    pub features: Vec<String>,
}

/// Plans available for checkout
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    offers: Vec<PlanOffer>,
}

impl PlanCatalog {
    /// Offer every tier that has a listed price
    pub fn from_plans(plans: &PlanTable) -> Self {
        let mut offers = Vec::with_capacity(plans.len());

        for tier in plans.iter() {
            let short = tier.short_name().to_lowercase();
            let Some((_, premium, description, ideal_for, features)) =
                LISTINGS.iter().find(|(key, ..)| *key == short)
            else {
                warn!(tier = %tier.tier_name, "No listed premium, plan not offered");
                continue;
            };

            offers.push(PlanOffer {
                tier_name: tier.tier_name.clone(),
                sum_insured: format_rupees(tier.sum_insured_per_acre),
                listed_premium: format_rupees(Decimal::from(*premium)),
                description: description.to_string(),
                ideal_for: ideal_for.to_string(),
                features: features.iter().map(|f| f.to_string()).collect(),
            });
        }

        Self { offers }
    }

    pub fn offers(&self) -> &[PlanOffer] {
        &self.offers
    }

    /// Find an offer by full or short tier name
    pub fn lookup(&self, tier_name: &str) -> Result<&PlanOffer> {
        let wanted = tier_name.trim().to_lowercase();
        self.offers
            .iter()
            .find(|offer| {
                let full = offer.tier_name.to_lowercase();
                full == wanted || full.strip_suffix(" protection") == Some(wanted.as_str())
            })
            .ok_or_else(|| InputError::UnknownPlan(tier_name.to_string()).into())
    }
}
