//! Lifestyle questionnaire domain: configuration data, response intake and scoring.
//!
//! The evaluation engine is a pure function over a hydrated questionnaire and a stored
//! response. Storage is reached only through the traits in [`repository`].

pub mod age;
pub mod catalog;
pub mod domain;
pub mod evaluation;
pub mod import;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use age::{age_on, validate_age_groups, AgeError, AgeGroupConfigError};
pub use domain::{
    latest_versions, AgeGroup, AgeGroupId, AnswerScore, AnswerScoreId, AnswerType, CriteriaId,
    EvaluationCriteria, Question, QuestionId, QuestionResponse, QuestionResponseId,
    Questionnaire, QuestionnaireId, QuestionnaireResponse, QuestionnaireSummary, RespondentId,
    ResponseId,
};
pub use evaluation::{evaluate, CutOffDecision, Evaluation, EvaluationEngine, EvaluationError};
pub use import::{ImportError, ScoreTableImporter};
pub use repository::{
    InMemoryQuestionnaires, InMemoryResponses, QuestionnaireRepository, RepositoryError,
    ResponseRepository,
};
pub use service::{
    QuestionnaireService, ResponseSubmission, ServiceError, SubmissionError, SubmittedAnswer,
};
