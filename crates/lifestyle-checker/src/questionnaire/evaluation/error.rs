use axum::http::StatusCode;

use super::super::domain::{AgeGroupId, AnswerScoreId, QuestionId, QuestionnaireId};

/// Reasons an evaluation can fail. None of them are transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("questionnaire {0} has no evaluation criteria defined")]
    MissingEvaluationCriteria(QuestionnaireId),
    #[error("questionnaire response must contain at least one answer")]
    EmptyResponse,
    #[error(
        "{supplied} answers supplied but the questionnaire only has {required} required questions"
    )]
    ResponseCountMismatch { required: usize, supplied: usize },
    #[error("answer score {answer_score_id} on question {question_id} has no valid age group")]
    MissingAgeGroup {
        question_id: QuestionId,
        answer_score_id: AnswerScoreId,
        age_group_id: Option<AgeGroupId>,
    },
    #[error("no response found for question {0}")]
    NoResponseForQuestion(QuestionId),
    #[error("no valid answer found for question {question_id} with answer '{answer}'")]
    NoMatchingAnswerScore {
        question_id: QuestionId,
        answer: String,
    },
}

impl EvaluationError {
    /// `true` when the questionnaire configuration is at fault rather than the submission.
    pub fn is_configuration_fault(&self) -> bool {
        matches!(
            self,
            EvaluationError::MissingEvaluationCriteria(_) | EvaluationError::MissingAgeGroup { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_configuration_fault() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}
