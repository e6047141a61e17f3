use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(
    /// Identifier of a questionnaire revision (one per name + version).
    QuestionnaireId
);
entity_id!(QuestionId);
entity_id!(AnswerScoreId);
entity_id!(AgeGroupId);
entity_id!(CriteriaId);
entity_id!(
    /// Identifier of a submitted questionnaire response.
    ResponseId
);
entity_id!(QuestionResponseId);

/// Patient identifier (NHS number) captured on each submission.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RespondentId(pub String);

/// Inclusive age bracket used to pick the score that applies to an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeGroup {
    pub id: AgeGroupId,
    pub name: String,
    pub min_age: u32,
    /// `u32::MAX` for the open-ended oldest bracket.
    pub max_age: u32,
    pub version: u32,
}

impl AgeGroup {
    pub fn contains(&self, age: u32) -> bool {
        self.min_age <= age && age <= self.max_age
    }
}

/// Kind of answer a question accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    YesNo,
}

impl AnswerType {
    pub const fn accepted_answers(self) -> &'static [&'static str] {
        match self {
            AnswerType::YesNo => &["Yes", "No"],
        }
    }

    pub fn accepts(self, answer: &str) -> bool {
        self.accepted_answers().contains(&answer)
    }
}

/// Score awarded for one literal answer within one age bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerScore {
    pub id: AnswerScoreId,
    pub answer: String,
    pub score: i32,
    /// Display position of the option; evaluation ignores it.
    pub order: u32,
    pub age_group_id: Option<AgeGroupId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub answer_type: AnswerType,
    pub order: u32,
    pub is_required: bool,
    pub answers: Vec<AnswerScore>,
}

impl Question {
    /// Answer options configured for one bracket, in display order.
    pub fn ordered_answers(&self, age_group_id: AgeGroupId) -> Vec<&AnswerScore> {
        let mut answers: Vec<&AnswerScore> = self
            .answers
            .iter()
            .filter(|answer| answer.age_group_id == Some(age_group_id))
            .collect();
        answers.sort_by_key(|answer| answer.order);
        answers
    }
}

/// Cutoff rule attached to a questionnaire.
///
/// `over_cut_off_medical_advice` sets the polarity: when `true` a score above the cutoff
/// triggers medical advice, when `false` a score at or under it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationCriteria {
    pub id: CriteriaId,
    pub cut_off_score: i32,
    pub over_cut_off_medical_advice: bool,
    pub exceeds_criteria_message: String,
    pub under_or_equal_criteria_message: String,
}

/// Fully hydrated questionnaire revision.
///
/// Relationships are held as identifier lookups: answer scores point at entries of
/// `age_groups` by id instead of owning the bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub id: QuestionnaireId,
    pub name: String,
    pub version: u32,
    pub questions: Vec<Question>,
    pub age_groups: Vec<AgeGroup>,
    pub evaluation_criteria: Option<EvaluationCriteria>,
    pub created_at: DateTime<Utc>,
}

impl Questionnaire {
    pub fn age_group(&self, id: AgeGroupId) -> Option<&AgeGroup> {
        self.age_groups.iter().find(|group| group.id == id)
    }

    pub fn age_group_named(&self, name: &str) -> Option<&AgeGroup> {
        self.age_groups.iter().find(|group| group.name == name)
    }

    /// Bracket the given age falls into, if any.
    pub fn age_group_for(&self, age: u32) -> Option<&AgeGroup> {
        self.age_groups.iter().find(|group| group.contains(age))
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// Questions in display order; equal `order` values keep insertion order.
    pub fn ordered_questions(&self) -> Vec<&Question> {
        let mut questions: Vec<&Question> = self.questions.iter().collect();
        questions.sort_by_key(|question| question.order);
        questions
    }

    pub fn required_question_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|question| question.is_required)
            .count()
    }

    /// Every answer score referencing the given bracket, paired with its question.
    pub fn answer_scores_in(
        &self,
        age_group_id: AgeGroupId,
    ) -> impl Iterator<Item = (&Question, &AnswerScore)> + '_ {
        self.questions.iter().flat_map(move |question| {
            question
                .answers
                .iter()
                .filter(move |answer| answer.age_group_id == Some(age_group_id))
                .map(move |answer| (question, answer))
        })
    }

    pub fn summary(&self) -> QuestionnaireSummary {
        QuestionnaireSummary {
            id: self.id,
            name: self.name.clone(),
            version: self.version,
        }
    }
}

/// Lightweight identity of a questionnaire revision echoed back with evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireSummary {
    pub id: QuestionnaireId,
    pub name: String,
    pub version: u32,
}

/// Keep only the highest version of each questionnaire name, ordered by name.
pub fn latest_versions(questionnaires: &[Questionnaire]) -> Vec<&Questionnaire> {
    let mut latest: Vec<&Questionnaire> = Vec::new();
    for questionnaire in questionnaires {
        match latest
            .iter_mut()
            .find(|existing| existing.name == questionnaire.name)
        {
            Some(existing) if existing.version < questionnaire.version => *existing = questionnaire,
            Some(_) => {}
            None => latest.push(questionnaire),
        }
    }
    latest.sort_by(|a, b| a.name.cmp(&b.name));
    latest
}

/// One submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: QuestionResponseId,
    pub questionnaire_response_id: ResponseId,
    pub question_id: QuestionId,
    pub response: String,
}

/// A patient's submission against one questionnaire revision.
///
/// The respondent's age is captured at submission time rather than a live bracket so that
/// later changes to the brackets do not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    pub id: ResponseId,
    pub questionnaire_id: QuestionnaireId,
    pub age_at_response: u32,
    pub respondent: RespondentId,
    pub created_at: DateTime<Utc>,
    pub answers: Vec<QuestionResponse>,
}

impl QuestionnaireResponse {
    pub fn answer_for(&self, question_id: QuestionId) -> Option<&QuestionResponse> {
        self.answers
            .iter()
            .find(|answer| answer.question_id == question_id)
    }
}
