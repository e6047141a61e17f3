mod error;
mod policy;
mod rules;

pub use error::EvaluationError;
pub use policy::CutOffDecision;

use chrono::{DateTime, Utc};
use policy::decide_outcome;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Questionnaire, QuestionnaireResponse, QuestionnaireSummary};

/// Stateless evaluator that scores a response against its questionnaire revision.
///
/// Evaluation is a pure function of its inputs, so one engine can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationEngine;

impl EvaluationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(
        &self,
        questionnaire: &Questionnaire,
        response: &QuestionnaireResponse,
    ) -> Result<Evaluation, EvaluationError> {
        evaluate(questionnaire, response)
    }
}

/// Score `response` and classify the total against the questionnaire's cutoff rule.
///
/// Fails fast on the first problem; there is no partial scoring and no default score.
pub fn evaluate(
    questionnaire: &Questionnaire,
    response: &QuestionnaireResponse,
) -> Result<Evaluation, EvaluationError> {
    rules::validate(questionnaire, response)?;

    let criteria = questionnaire
        .evaluation_criteria
        .as_ref()
        .ok_or(EvaluationError::MissingEvaluationCriteria(questionnaire.id))?;

    let total_score = rules::total_score(questionnaire, response)?;
    let decision = decide_outcome(total_score, criteria);

    debug!(
        questionnaire = %questionnaire.id,
        version = questionnaire.version,
        total_score,
        cut_off = criteria.cut_off_score,
        exceeds = decision.exceeds,
        seek_medical_advice = decision.seek_medical_advice,
        "questionnaire response evaluated"
    );

    Ok(Evaluation {
        seek_medical_advice: decision.seek_medical_advice,
        message: decision.message(criteria).to_string(),
        total_score,
        created_at: response.created_at,
        questionnaire: questionnaire.summary(),
    })
}

/// Scored outcome of one questionnaire response. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub seek_medical_advice: bool,
    pub message: String,
    pub total_score: i64,
    pub created_at: DateTime<Utc>,
    pub questionnaire: QuestionnaireSummary,
}
