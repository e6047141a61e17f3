use chrono::{NaiveDate, Utc};
use clap::Args;
use lifestyle_checker::config::AppConfig;
use lifestyle_checker::error::AppError;
use lifestyle_checker::questionnaire::catalog::lifestyle_questionnaire;
use lifestyle_checker::questionnaire::{
    InMemoryQuestionnaires, InMemoryResponses, QuestionId, Questionnaire, QuestionnaireService,
    RespondentId, ResponseSubmission, ScoreTableImporter, SubmittedAnswer,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Optional CSV score table (Question,Answer,Age Group,Score,Order) to apply
    #[arg(long)]
    pub(crate) scores: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Respondent date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date_of_birth: NaiveDate,
    /// Date the answers are given on (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Respondent identifier recorded with the response
    #[arg(long, default_value = "anonymous")]
    pub(crate) respondent: String,
    /// Optional CSV score table (Question,Answer,Age Group,Score,Order) to apply
    #[arg(long)]
    pub(crate) scores: Option<PathBuf>,
    /// Answer for each question in display order, e.g. --answer Yes --answer No
    #[arg(long = "answer", required = true)]
    pub(crate) answers: Vec<String>,
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let questionnaire = load_questionnaire(args.scores)?;
    println!("{}", serde_json::to_string_pretty(&questionnaire)?);
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs, config: &AppConfig) -> Result<(), AppError> {
    let EvaluateArgs {
        date_of_birth,
        today,
        respondent,
        scores,
        answers,
    } = args;

    let questionnaire = load_questionnaire(scores)?;
    let submission = build_submission(
        &questionnaire,
        RespondentId(respondent),
        date_of_birth,
        answers,
    );

    let now = match today {
        Some(day) => day
            .and_hms_opt(12, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or_else(Utc::now),
        None => Utc::now(),
    };

    let service = QuestionnaireService::with_minimum_age(
        Arc::new(InMemoryQuestionnaires::with([questionnaire])),
        Arc::new(InMemoryResponses::default()),
        config.questionnaire.minimum_respondent_age,
    );
    let (response, evaluation) = service.submit_and_evaluate(submission, now)?;

    info!(
        response = %response.id,
        age = response.age_at_response,
        "evaluated command line submission"
    );
    println!("{}", serde_json::to_string_pretty(&evaluation)?);
    Ok(())
}

/// Pairs answers with questions in display order. Answers beyond the last question are kept
/// under fresh question ids so the engine rejects the surplus.
fn build_submission(
    questionnaire: &Questionnaire,
    respondent: RespondentId,
    date_of_birth: NaiveDate,
    answers: Vec<String>,
) -> ResponseSubmission {
    let questions = questionnaire.ordered_questions();
    ResponseSubmission {
        questionnaire_id: questionnaire.id,
        respondent,
        date_of_birth,
        answers: answers
            .into_iter()
            .enumerate()
            .map(|(index, response)| SubmittedAnswer {
                question_id: questions
                    .get(index)
                    .map(|question| question.id)
                    .unwrap_or_else(QuestionId::new),
                response,
            })
            .collect(),
    }
}

fn load_questionnaire(scores: Option<PathBuf>) -> Result<Questionnaire, AppError> {
    let questionnaire = lifestyle_questionnaire();
    match scores {
        Some(path) => Ok(ScoreTableImporter::from_path(path, questionnaire)?),
        None => Ok(questionnaire),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifestyle_checker::config::{AppEnvironment, QuestionnaireConfig, TelemetryConfig};
    use lifestyle_checker::questionnaire::{EvaluationError, ServiceError};

    fn config() -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            questionnaire: QuestionnaireConfig {
                minimum_respondent_age: 16,
            },
        }
    }

    fn evaluate_args(answers: &[&str]) -> EvaluateArgs {
        EvaluateArgs {
            date_of_birth: NaiveDate::from_ymd_opt(1990, 2, 28).expect("valid date"),
            today: NaiveDate::from_ymd_opt(2025, 7, 14),
            respondent: "9434765919".to_string(),
            scores: None,
            answers: answers.iter().map(|answer| answer.to_string()).collect(),
        }
    }

    #[test]
    fn surplus_answers_are_rejected() {
        let err = run_evaluate(
            evaluate_args(&["Yes", "No", "No", "Yes", "Garbage"]),
            &config(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            AppError::Service(ServiceError::Evaluation(
                EvaluationError::ResponseCountMismatch {
                    required: 3,
                    supplied: 5,
                }
            ))
        ));
    }

    #[test]
    fn every_answer_becomes_a_submitted_answer() {
        let questionnaire = lifestyle_questionnaire();
        let answers = ["Yes", "No", "No", "Garbage"]
            .iter()
            .map(|answer| answer.to_string())
            .collect();

        let submission = build_submission(
            &questionnaire,
            RespondentId("anonymous".to_string()),
            NaiveDate::from_ymd_opt(1990, 2, 28).expect("valid date"),
            answers,
        );

        assert_eq!(submission.answers.len(), 4);
        let questions = questionnaire.ordered_questions();
        assert_eq!(submission.answers[0].question_id, questions[0].id);
        assert_eq!(submission.answers[2].question_id, questions[2].id);
        assert!(questionnaire
            .question(submission.answers[3].question_id)
            .is_none());
    }

    #[test]
    fn matching_answers_evaluate_successfully() {
        assert!(run_evaluate(evaluate_args(&["No", "No", "Yes"]), &config()).is_ok());
    }

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date(" 1990-02-28 "),
            Ok(NaiveDate::from_ymd_opt(1990, 2, 28).expect("valid date"))
        );
    }

    #[test]
    fn parse_date_rejects_day_first_dates() {
        let err = parse_date("28-02-1990").unwrap_err();
        assert!(err.contains("28-02-1990"));
    }

    #[test]
    fn load_questionnaire_defaults_to_seeded_catalog() {
        let questionnaire = load_questionnaire(None).expect("catalog loads");
        assert_eq!(questionnaire.questions.len(), 3);
        assert_eq!(questionnaire.version, 1);
    }
}
