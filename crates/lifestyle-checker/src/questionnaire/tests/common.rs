use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::questionnaire::domain::{
    AgeGroup, AgeGroupId, AnswerScore, AnswerScoreId, AnswerType, CriteriaId, EvaluationCriteria,
    Question, QuestionId, QuestionResponse, QuestionResponseId, Questionnaire, QuestionnaireId,
    QuestionnaireResponse, RespondentId, ResponseId,
};
use crate::questionnaire::repository::{
    InMemoryQuestionnaires, InMemoryResponses, RepositoryError, ResponseRepository,
};
use crate::questionnaire::service::{QuestionnaireService, ResponseSubmission, SubmittedAnswer};

pub(super) const EXCEEDS: &str = "Please book an appointment";
pub(super) const UNDER_OR_EQUAL: &str = "No need to see you at this time";

/// (question text, [(answer, scores for 16-21, 22-40, 41-65, 66+)])
const EDITED_SCORES: [(&str, [(&str, [i32; 4]); 2]); 3] = [
    (
        "Do you drink on more than 2 days a week?",
        [("Yes", [2, 2, 1, 3]), ("No", [0, 0, 0, 0])],
    ),
    ("Do you smoke?", [("Yes", [1, 1, 3, 3]), ("No", [0, 0, 0, 0])]),
    (
        "Do you exercise more than 1 hour per week?",
        [("Yes", [0, 0, 0, 0]), ("No", [2, 2, 2, 3])],
    ),
];

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn age_groups() -> Vec<AgeGroup> {
    [("16-21", 16, 21), ("22-40", 22, 40), ("41-65", 41, 65), ("66+", 66, u32::MAX)]
        .into_iter()
        .map(|(name, min_age, max_age)| AgeGroup {
            id: AgeGroupId::new(),
            name: name.to_string(),
            min_age,
            max_age,
            version: 1,
        })
        .collect()
}

pub(super) fn criteria(cut_off_score: i32, over_cut_off_medical_advice: bool) -> EvaluationCriteria {
    EvaluationCriteria {
        id: CriteriaId::new(),
        cut_off_score,
        over_cut_off_medical_advice,
        exceeds_criteria_message: EXCEEDS.to_string(),
        under_or_equal_criteria_message: UNDER_OR_EQUAL.to_string(),
    }
}

/// Three required yes/no questions, cutoff 3, advice when exceeding.
pub(super) fn questionnaire() -> Questionnaire {
    let age_groups = age_groups();
    let questions = EDITED_SCORES
        .iter()
        .zip(1..)
        .map(|((text, options), order)| Question {
            id: QuestionId::new(),
            text: text.to_string(),
            answer_type: AnswerType::YesNo,
            order,
            is_required: true,
            answers: options
                .iter()
                .zip(1..)
                .flat_map(|((answer, scores), display_order)| {
                    age_groups
                        .iter()
                        .zip(scores)
                        .map(move |(group, score)| AnswerScore {
                            id: AnswerScoreId::new(),
                            answer: answer.to_string(),
                            score: *score,
                            order: display_order,
                            age_group_id: Some(group.id),
                        })
                })
                .collect(),
        })
        .collect();

    Questionnaire {
        id: QuestionnaireId::new(),
        name: "Lifestyle Questionnaire".to_string(),
        version: 2,
        questions,
        age_groups,
        evaluation_criteria: Some(criteria(3, true)),
        created_at: at(2025, 7, 10),
    }
}

/// Response answering the questions in display order.
pub(super) fn response(
    questionnaire: &Questionnaire,
    age: u32,
    answers: &[&str],
) -> QuestionnaireResponse {
    let id = ResponseId::new();
    QuestionnaireResponse {
        id,
        questionnaire_id: questionnaire.id,
        age_at_response: age,
        respondent: RespondentId("9434765919".to_string()),
        created_at: at(2025, 7, 14),
        answers: questionnaire
            .ordered_questions()
            .into_iter()
            .zip(answers)
            .map(|(question, answer)| QuestionResponse {
                id: QuestionResponseId::new(),
                questionnaire_response_id: id,
                question_id: question.id,
                response: answer.to_string(),
            })
            .collect(),
    }
}

pub(super) fn submission(
    questionnaire: &Questionnaire,
    date_of_birth: NaiveDate,
    answers: &[&str],
) -> ResponseSubmission {
    ResponseSubmission {
        questionnaire_id: questionnaire.id,
        respondent: RespondentId("9434765919".to_string()),
        date_of_birth,
        answers: questionnaire
            .ordered_questions()
            .into_iter()
            .zip(answers)
            .map(|(question, answer)| SubmittedAnswer {
                question_id: question.id,
                response: answer.to_string(),
            })
            .collect(),
    }
}

pub(super) fn build_service(
    questionnaire: Questionnaire,
) -> QuestionnaireService<InMemoryQuestionnaires, InMemoryResponses> {
    QuestionnaireService::new(
        Arc::new(InMemoryQuestionnaires::with([questionnaire])),
        Arc::new(InMemoryResponses::default()),
    )
}

pub(super) struct UnavailableResponses;

impl ResponseRepository for UnavailableResponses {
    fn insert(
        &self,
        _response: QuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ResponseId) -> Result<Option<QuestionnaireResponse>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_respondent(
        &self,
        _respondent: &RespondentId,
    ) -> Result<Vec<QuestionnaireResponse>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_questionnaire(
        &self,
        _questionnaire_id: &QuestionnaireId,
    ) -> Result<Vec<QuestionnaireResponse>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
