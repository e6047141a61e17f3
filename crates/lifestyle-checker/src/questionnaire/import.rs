use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{AnswerScore, AnswerScoreId, QuestionId, Questionnaire};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownQuestion(u32),
    AmbiguousQuestion(u32),
    UnknownAgeGroup(String),
    UnsupportedAnswer { question: u32, answer: String },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read score table: {}", err),
            ImportError::Csv(err) => write!(f, "invalid score table CSV data: {}", err),
            ImportError::UnknownQuestion(order) => {
                write!(f, "score table references unknown question {}", order)
            }
            ImportError::AmbiguousQuestion(order) => write!(
                f,
                "score table references question {} but several questions share that order",
                order
            ),
            ImportError::UnknownAgeGroup(name) => {
                write!(f, "score table references unknown age group '{}'", name)
            }
            ImportError::UnsupportedAnswer { question, answer } => write!(
                f,
                "answer '{}' is not accepted by question {}",
                answer, question
            ),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    #[serde(rename = "Question")]
    question: u32,
    #[serde(rename = "Answer")]
    answer: String,
    #[serde(rename = "Age Group")]
    age_group: String,
    #[serde(rename = "Score")]
    score: i32,
    #[serde(rename = "Order")]
    order: u32,
}

/// Loads answer score tables exported by administrators.
///
/// Columns are `Question,Answer,Age Group,Score,Order`, where `Question` is the question's
/// display order and `Age Group` the bracket name. Questions named in the table have their
/// answer scores replaced; other questions are untouched.
pub struct ScoreTableImporter;

impl ScoreTableImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        questionnaire: Questionnaire,
    ) -> Result<Questionnaire, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, questionnaire)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        mut questionnaire: Questionnaire,
    ) -> Result<Questionnaire, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut replacements: BTreeMap<QuestionId, Vec<AnswerScore>> = BTreeMap::new();

        for record in csv_reader.deserialize::<ScoreRow>() {
            let row = record?;

            let question = match questionnaire
                .questions
                .iter()
                .filter(|question| question.order == row.question)
                .collect::<Vec<_>>()
                .as_slice()
            {
                [question] => *question,
                [] => return Err(ImportError::UnknownQuestion(row.question)),
                _ => return Err(ImportError::AmbiguousQuestion(row.question)),
            };

            if !question.answer_type.accepts(&row.answer) {
                return Err(ImportError::UnsupportedAnswer {
                    question: row.question,
                    answer: row.answer,
                });
            }

            let age_group = questionnaire
                .age_group_named(&row.age_group)
                .ok_or_else(|| ImportError::UnknownAgeGroup(row.age_group.clone()))?;

            replacements
                .entry(question.id)
                .or_default()
                .push(AnswerScore {
                    id: AnswerScoreId::new(),
                    answer: row.answer,
                    score: row.score,
                    order: row.order,
                    age_group_id: Some(age_group.id),
                });
        }

        for question in &mut questionnaire.questions {
            if let Some(answers) = replacements.remove(&question.id) {
                question.answers = answers;
            }
        }

        Ok(questionnaire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::catalog::lifestyle_questionnaire;
    use std::io::Cursor;

    const SMOKING_TABLE: &str = "Question,Answer,Age Group,Score,Order\n\
        2,Yes,16-21,1,2\n\
        2,Yes,22-40,1,2\n\
        2,Yes,41-65,3,2\n\
        2,Yes,66+,3,2\n\
        2,No,16-21,0,1\n\
        2,No,22-40,0,1\n\
        2,No,41-65,0,1\n\
        2,No,66+,0,1\n";

    #[test]
    fn replaces_scores_for_listed_questions_only() {
        let original = lifestyle_questionnaire();
        let imported =
            ScoreTableImporter::from_reader(Cursor::new(SMOKING_TABLE), original.clone())
                .expect("table imports");

        assert_eq!(imported.questions[0], original.questions[0]);
        assert_eq!(imported.questions[2], original.questions[2]);

        let smoking = &imported.questions[1];
        assert_eq!(smoking.answers.len(), 8);
        let young = imported.age_group_named("16-21").expect("bracket");
        let yes = smoking
            .ordered_answers(young.id)
            .into_iter()
            .find(|option| option.answer == "Yes")
            .expect("yes option");
        assert_eq!(yes.score, 1);
    }

    #[test]
    fn rejects_unknown_age_group() {
        let table = "Question,Answer,Age Group,Score,Order\n1,Yes,12-15,1,2\n";
        let err = ScoreTableImporter::from_reader(Cursor::new(table), lifestyle_questionnaire())
            .unwrap_err();
        assert!(matches!(err, ImportError::UnknownAgeGroup(name) if name == "12-15"));
    }

    #[test]
    fn rejects_unknown_question_and_answer() {
        let table = "Question,Answer,Age Group,Score,Order\n9,Yes,16-21,1,2\n";
        let err = ScoreTableImporter::from_reader(Cursor::new(table), lifestyle_questionnaire())
            .unwrap_err();
        assert!(matches!(err, ImportError::UnknownQuestion(9)));

        let table = "Question,Answer,Age Group,Score,Order\n1,Maybe,16-21,1,2\n";
        let err = ScoreTableImporter::from_reader(Cursor::new(table), lifestyle_questionnaire())
            .unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedAnswer { question: 1, .. }));
    }

    #[test]
    fn rejects_rows_for_questions_sharing_an_order() {
        let mut questionnaire = lifestyle_questionnaire();
        questionnaire.questions[2].order = 2;
        let err = ScoreTableImporter::from_reader(Cursor::new(SMOKING_TABLE), questionnaire)
            .unwrap_err();
        assert!(matches!(err, ImportError::AmbiguousQuestion(2)));
    }

    #[test]
    fn malformed_scores_surface_csv_errors() {
        let table = "Question,Answer,Age Group,Score,Order\n1,Yes,16-21,lots,2\n";
        let err = ScoreTableImporter::from_reader(Cursor::new(table), lifestyle_questionnaire())
            .unwrap_err();
        assert!(matches!(err, ImportError::Csv(_)));
    }
}
