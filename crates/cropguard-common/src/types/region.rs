//! States and districts served by CropGuard, and the portal languages

use serde::{Deserialize, Serialize};

/// States where cover is sold, in display order
pub const STATES: [&str; 5] = [
    "Karnataka",
    "Maharashtra",
    "Andhra Pradesh",
    "Tamil Nadu",
    "Telangana",
];

const DISTRICTS: [(&str, &[&str]); 5] = [
    (
        "Karnataka",
        &["Bengaluru Rural", "Bengaluru Urban", "Mandya", "Raichur", "Mysuru", "Hassan"],
    ),
    ("Maharashtra", &["Pune", "Nashik", "Nagpur", "Aurangabad"]),
    ("Andhra Pradesh", &["Guntur", "Krishna", "Kurnool", "Anantapur"]),
    ("Tamil Nadu", &["Chennai", "Coimbatore", "Madurai", "Salem"]),
    ("Telangana", &["Hyderabad", "Warangal", "Nizamabad", "Karimnagar"]),
];

/// Canonical name of a served state, matched case-insensitively
pub fn find_state(name: &str) -> Option<&'static str> {
    let name = name.trim();
    STATES.into_iter().find(|state| state.eq_ignore_ascii_case(name))
}

/// Districts of a served state
pub fn districts_of(state: &str) -> Option<&'static [&'static str]> {
    let state = find_state(state)?;
    DISTRICTS
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, districts)| *districts)
}

/// Canonical district name, if the district belongs to the state
pub fn find_district(state: &str, district: &str) -> Option<&'static str> {
    let district = district.trim();
    districts_of(state)?
        .iter()
        .copied()
        .find(|d| d.eq_ignore_ascii_case(district))
}

/// A state with its districts, as listed to the farmer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub state: &'static str,
    pub districts: &'static [&'static str],
}

/// Every served state with its districts
pub fn regions() -> Vec<Region> {
    DISTRICTS
        .iter()
        .map(|&(state, districts)| Region { state, districts })
        .collect()
}

/// Preferred portal language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Kannada,
    Hindi,
}
