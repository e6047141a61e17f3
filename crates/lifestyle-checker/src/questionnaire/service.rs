use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::age::{age_on, AgeError};
use super::domain::{
    QuestionId, QuestionResponse, QuestionResponseId, QuestionnaireId, QuestionnaireResponse,
    RespondentId, ResponseId,
};
use super::evaluation::{Evaluation, EvaluationEngine, EvaluationError};
use super::repository::{QuestionnaireRepository, RepositoryError, ResponseRepository};

/// Default lower bound of the youngest age bracket.
pub const DEFAULT_MINIMUM_AGE: u32 = 16;

/// Answers as received from a patient before age stamping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSubmission {
    pub questionnaire_id: QuestionnaireId,
    pub respondent: RespondentId,
    pub date_of_birth: NaiveDate,
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: QuestionId,
    pub response: String,
}

/// Service composing the questionnaire store, response store and evaluation engine.
pub struct QuestionnaireService<Q, R> {
    questionnaires: Arc<Q>,
    responses: Arc<R>,
    engine: EvaluationEngine,
    minimum_age: u32,
}

impl<Q, R> QuestionnaireService<Q, R>
where
    Q: QuestionnaireRepository + 'static,
    R: ResponseRepository + 'static,
{
    pub fn new(questionnaires: Arc<Q>, responses: Arc<R>) -> Self {
        Self::with_minimum_age(questionnaires, responses, DEFAULT_MINIMUM_AGE)
    }

    pub fn with_minimum_age(questionnaires: Arc<Q>, responses: Arc<R>, minimum_age: u32) -> Self {
        Self {
            questionnaires,
            responses,
            engine: EvaluationEngine::new(),
            minimum_age,
        }
    }

    /// Record a submission, stamping the respondent's age as of `now`.
    pub fn submit(
        &self,
        submission: ResponseSubmission,
        now: DateTime<Utc>,
    ) -> Result<QuestionnaireResponse, ServiceError> {
        let ResponseSubmission {
            questionnaire_id,
            respondent,
            date_of_birth,
            answers,
        } = submission;

        if answers.is_empty() {
            return Err(SubmissionError::NoAnswers.into());
        }

        let age = age_on(date_of_birth, now.date_naive()).map_err(SubmissionError::from)?;
        if age < self.minimum_age {
            return Err(SubmissionError::BelowMinimumAge {
                age,
                minimum: self.minimum_age,
            }
            .into());
        }

        if self.questionnaires.fetch(&questionnaire_id)?.is_none() {
            return Err(RepositoryError::NotFound.into());
        }

        let response_id = ResponseId::new();
        let response = QuestionnaireResponse {
            id: response_id,
            questionnaire_id,
            age_at_response: age,
            respondent,
            created_at: now,
            answers: answers
                .into_iter()
                .map(|answer| QuestionResponse {
                    id: QuestionResponseId::new(),
                    questionnaire_response_id: response_id,
                    question_id: answer.question_id,
                    response: answer.response,
                })
                .collect(),
        };

        let stored = self.responses.insert(response)?;
        info!(
            response = %stored.id,
            questionnaire = %stored.questionnaire_id,
            answers = stored.answers.len(),
            "questionnaire response recorded"
        );
        Ok(stored)
    }

    /// Evaluate a stored response against the questionnaire revision it answered.
    pub fn evaluate(&self, response_id: &ResponseId) -> Result<Evaluation, ServiceError> {
        let response = self
            .responses
            .fetch(response_id)?
            .ok_or(RepositoryError::NotFound)?;
        self.evaluate_response(&response)
    }

    /// Submit and immediately evaluate, as the patient-facing flow does.
    pub fn submit_and_evaluate(
        &self,
        submission: ResponseSubmission,
        now: DateTime<Utc>,
    ) -> Result<(QuestionnaireResponse, Evaluation), ServiceError> {
        let response = self.submit(submission, now)?;
        let evaluation = self.evaluate_response(&response)?;
        Ok((response, evaluation))
    }

    /// Evaluations for every response a respondent has submitted, oldest first.
    pub fn evaluations_for(
        &self,
        respondent: &RespondentId,
    ) -> Result<Vec<Evaluation>, ServiceError> {
        self.responses
            .for_respondent(respondent)?
            .iter()
            .map(|response| self.evaluate_response(response))
            .collect()
    }

    fn evaluate_response(
        &self,
        response: &QuestionnaireResponse,
    ) -> Result<Evaluation, ServiceError> {
        let questionnaire = self
            .questionnaires
            .fetch(&response.questionnaire_id)?
            .ok_or(RepositoryError::NotFound)?;

        match self.engine.evaluate(&questionnaire, response) {
            Ok(evaluation) => {
                info!(
                    response = %response.id,
                    questionnaire = %questionnaire.id,
                    version = questionnaire.version,
                    total_score = evaluation.total_score,
                    seek_medical_advice = evaluation.seek_medical_advice,
                    "evaluation computed"
                );
                Ok(evaluation)
            }
            Err(err) => {
                warn!(response = %response.id, error = %err, "evaluation failed");
                Err(err.into())
            }
        }
    }
}

/// Problems with a submission detected before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission contains no answers")]
    NoAnswers,
    #[error("respondent aged {age} is below the minimum age of {minimum}")]
    BelowMinimumAge { age: u32, minimum: u32 },
    #[error(transparent)]
    Age(#[from] AgeError),
}

/// Error raised by the questionnaire service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
