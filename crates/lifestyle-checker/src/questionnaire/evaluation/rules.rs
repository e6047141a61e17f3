use tracing::trace;

use super::super::domain::{Questionnaire, QuestionnaireResponse};
use super::error::EvaluationError;

/// Up-front checks run before any scoring.
///
/// The answer count check only guards against more answers than required questions; per
/// question coverage is enforced while scoring.
pub(crate) fn validate(
    questionnaire: &Questionnaire,
    response: &QuestionnaireResponse,
) -> Result<(), EvaluationError> {
    if questionnaire.evaluation_criteria.is_none() {
        return Err(EvaluationError::MissingEvaluationCriteria(questionnaire.id));
    }

    if response.answers.is_empty() {
        return Err(EvaluationError::EmptyResponse);
    }

    let required = questionnaire.required_question_count();
    let supplied = response.answers.len();
    if required < supplied {
        return Err(EvaluationError::ResponseCountMismatch { required, supplied });
    }

    for question in &questionnaire.questions {
        for answer in &question.answers {
            let resolved = answer
                .age_group_id
                .and_then(|id| questionnaire.age_group(id));
            if resolved.is_none() {
                return Err(EvaluationError::MissingAgeGroup {
                    question_id: question.id,
                    answer_score_id: answer.id,
                    age_group_id: answer.age_group_id,
                });
            }
        }
    }

    Ok(())
}

/// Sum the score of the matching answer option for every question.
///
/// Option scores are `i32`; the sum is widened so large configured scores cannot overflow.
pub(crate) fn total_score(
    questionnaire: &Questionnaire,
    response: &QuestionnaireResponse,
) -> Result<i64, EvaluationError> {
    let age = response.age_at_response;
    let mut total_score: i64 = 0;

    for question in &questionnaire.questions {
        let submitted = response
            .answer_for(question.id)
            .ok_or(EvaluationError::NoResponseForQuestion(question.id))?;

        let matched = question
            .answers
            .iter()
            .find(|option| {
                option.answer == submitted.response
                    && option
                        .age_group_id
                        .and_then(|id| questionnaire.age_group(id))
                        .is_some_and(|group| group.contains(age))
            })
            .ok_or_else(|| EvaluationError::NoMatchingAnswerScore {
                question_id: question.id,
                answer: submitted.response.clone(),
            })?;

        trace!(question = %question.id, answer = %matched.answer, score = matched.score, "matched answer score");
        total_score += i64::from(matched.score);
    }

    Ok(total_score)
}
