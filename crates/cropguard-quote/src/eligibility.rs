//! Eligibility checklist evaluation

use cropguard_common::{ChecklistItem, EligibilityChecklist, EligibilityReport};

/// Eligible iff every checklist item is answered yes
pub fn evaluate_eligibility(checklist: &EligibilityChecklist) -> bool {
    ChecklistItem::ALL
        .into_iter()
        .all(|item| checklist.answer(item))
}

/// Verdict together with the items still unchecked
pub fn eligibility_report(checklist: &EligibilityChecklist) -> EligibilityReport {
    EligibilityReport {
        eligible: evaluate_eligibility(checklist),
        missing: checklist.missing(),
    }
}
