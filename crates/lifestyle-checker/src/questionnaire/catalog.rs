use chrono::Utc;

use super::domain::{
    AgeGroup, AgeGroupId, AnswerScore, AnswerScoreId, AnswerType, CriteriaId, EvaluationCriteria,
    Question, QuestionId, Questionnaire, QuestionnaireId,
};

pub const LIFESTYLE_QUESTIONNAIRE: &str = "Lifestyle Questionnaire";

pub const EXCEEDS_MESSAGE: &str = "We think there are some simple things you could do to improve you quality of life, please phone to book an appointment";
pub const UNDER_OR_EQUAL_MESSAGE: &str =
    "Thank you for answering our questions, we don't need to see you at this time. Keep up the good work!";

/// Brackets in ascending order; the last one is open ended.
pub fn standard_age_groups() -> Vec<AgeGroup> {
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

struct QuestionTemplate {
    text: &'static str,
    /// (answer, display order, score per bracket in ascending age order)
    options: [(&'static str, u32, [i32; 4]); 2],
}

const LIFESTYLE_QUESTIONS: [QuestionTemplate; 3] = [
    QuestionTemplate {
        text: "Do you drink on more than 2 days a week?",
        options: [("Yes", 2, [1, 2, 3, 3]), ("No", 1, [0, 0, 0, 0])],
    },
    QuestionTemplate {
        text: "Do you smoke?",
        options: [("Yes", 2, [2, 2, 2, 3]), ("No", 1, [0, 0, 0, 0])],
    },
    QuestionTemplate {
        text: "Do you excercise more than 2 days per week?",
        options: [("Yes", 1, [0, 0, 0, 0]), ("No", 2, [1, 3, 2, 1])],
    },
];

/// The seeded lifestyle questionnaire, version 1, with its score table and cutoff rule.
pub fn lifestyle_questionnaire() -> Questionnaire {
    let age_groups = standard_age_groups();

    let questions = LIFESTYLE_QUESTIONS
        .iter()
        .zip(1..)
        .map(|(template, order)| Question {
            id: QuestionId::new(),
            text: template.text.to_string(),
            answer_type: AnswerType::YesNo,
            order,
            is_required: true,
            answers: template
                .options
                .iter()
                .flat_map(|(answer, display_order, scores)| {
                    age_groups
                        .iter()
                        .zip(scores)
                        .map(move |(group, score)| AnswerScore {
                            id: AnswerScoreId::new(),
                            answer: answer.to_string(),
                            score: *score,
                            order: *display_order,
                            age_group_id: Some(group.id),
                        })
                })
                .collect(),
        })
        .collect();

    Questionnaire {
        id: QuestionnaireId::new(),
        name: LIFESTYLE_QUESTIONNAIRE.to_string(),
        version: 1,
        questions,
        age_groups,
        evaluation_criteria: Some(EvaluationCriteria {
            id: CriteriaId::new(),
            cut_off_score: 3,
            over_cut_off_medical_advice: true,
            exceeds_criteria_message: EXCEEDS_MESSAGE.to_string(),
            under_or_equal_criteria_message: UNDER_OR_EQUAL_MESSAGE.to_string(),
        }),
        created_at: Utc::now(),
    }
}
