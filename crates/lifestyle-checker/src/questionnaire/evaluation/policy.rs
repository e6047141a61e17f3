use serde::{Deserialize, Serialize};

use super::super::domain::EvaluationCriteria;

/// Outcome of comparing a total score against the cutoff rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutOffDecision {
    /// Strictly above the cutoff; equal scores do not exceed.
    pub exceeds: bool,
    pub seek_medical_advice: bool,
}

impl CutOffDecision {
    pub fn message<'a>(&self, criteria: &'a EvaluationCriteria) -> &'a str {
        if self.exceeds {
            &criteria.exceeds_criteria_message
        } else {
            &criteria.under_or_equal_criteria_message
        }
    }
}

/// Advice is needed exactly when the exceeding state matches the configured polarity.
pub(crate) fn decide_outcome(total_score: i64, criteria: &EvaluationCriteria) -> CutOffDecision {
    let exceeds = total_score > i64::from(criteria.cut_off_score);

    CutOffDecision {
        exceeds,
        seek_medical_advice: exceeds == criteria.over_cut_off_medical_advice,
    }
}
