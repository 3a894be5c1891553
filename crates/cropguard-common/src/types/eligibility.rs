//! Eligibility checklist - five yes/no self-attestations
//!
//! The checklist is a coarse pre-qualification gate: a farmer is eligible
//! only when every item is answered yes. Unanswered items count as no.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CropGuardError, InputError};

/// A single checklist question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistItem {
    /// Land ownership documents (RTC/Pahani/Patta)
    LandDocuments,
    /// Aadhaar card
    IdentityDocument,
    /// Bank account for claim transfer
    BankAccount,
    /// Crop type and area known
    CropAndAreaKnown,
    /// Sowing planned for the upcoming season
    SowingPlanned,
}

impl ChecklistItem {
    /// All items, in checklist order
    pub const ALL: [ChecklistItem; 5] = [
        ChecklistItem::LandDocuments,
        ChecklistItem::IdentityDocument,
        ChecklistItem::BankAccount,
        ChecklistItem::CropAndAreaKnown,
        ChecklistItem::SowingPlanned,
    ];

    /// Stable short id used by the web form
    pub fn id(&self) -> &'static str {
        match self {
            ChecklistItem::LandDocuments => "land",
            ChecklistItem::IdentityDocument => "aadhaar",
            ChecklistItem::BankAccount => "bank",
            ChecklistItem::CropAndAreaKnown => "crop",
            ChecklistItem::SowingPlanned => "season",
        }
    }

    /// Question shown to the farmer
    pub fn label(&self) -> &'static str {
        match self {
            ChecklistItem::LandDocuments => "I have land documents (RTC/Pahani/Patta)",
            ChecklistItem::IdentityDocument => "I have Aadhaar card",
            ChecklistItem::BankAccount => "I have a bank account",
            ChecklistItem::CropAndAreaKnown => "I know my crop type and area",
            ChecklistItem::SowingPlanned => "I am planning to sow in the upcoming season",
        }
    }
}

impl fmt::Display for ChecklistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChecklistItem {
    type Err = CropGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        ChecklistItem::ALL
            .into_iter()
            .find(|item| item.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| InputError::UnknownChecklistItem(s.to_string()).into())
    }
}

/// Answers to the five checklist questions
///
/// `Default` is "nothing checked". Unknown keys are rejected, so a
/// misspelled answer is never read as "no".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EligibilityChecklist {
    pub land_documents: bool,
    pub identity_document: bool,
    pub bank_account: bool,
    pub crop_and_area_known: bool,
    pub sowing_planned: bool,
}

impl EligibilityChecklist {
    /// Checklist with every item answered yes
    pub fn all_checked() -> Self {
        Self {
            land_documents: true,
            identity_document: true,
            bank_account: true,
            crop_and_area_known: true,
            sowing_planned: true,
        }
    }

    /// Build from the ids of the checked items; ids may repeat
    pub fn from_checked_ids<I, S>(ids: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut checklist = Self::default();
        for id in ids {
            let item: ChecklistItem = id.as_ref().parse()?;
            checklist.set(item, true);
        }
        Ok(checklist)
    }

    pub fn answer(&self, item: ChecklistItem) -> bool {
        match item {
            ChecklistItem::LandDocuments => self.land_documents,
            ChecklistItem::IdentityDocument => self.identity_document,
            ChecklistItem::BankAccount => self.bank_account,
            ChecklistItem::CropAndAreaKnown => self.crop_and_area_known,
            ChecklistItem::SowingPlanned => self.sowing_planned,
        }
    }

    pub fn set(&mut self, item: ChecklistItem, answer: bool) {
        let slot = match item {
            ChecklistItem::LandDocuments => &mut self.land_documents,
            ChecklistItem::IdentityDocument => &mut self.identity_document,
            ChecklistItem::BankAccount => &mut self.bank_account,
            ChecklistItem::CropAndAreaKnown => &mut self.crop_and_area_known,
            ChecklistItem::SowingPlanned => &mut self.sowing_planned,
        };
        *slot = answer;
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, item: ChecklistItem, answer: bool) -> Self {
        self.set(item, answer);
        self
    }

    /// Items not answered yes, in checklist order
    pub fn missing(&self) -> Vec<ChecklistItem> {
        ChecklistItem::ALL
            .into_iter()
            .filter(|item| !self.answer(*item))
            .collect()
    }
}

/// Verdict plus the items still to be checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub missing: Vec<ChecklistItem>,
}
