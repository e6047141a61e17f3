use crate::commands::{run_catalog, run_evaluate, CatalogArgs, EvaluateArgs};
use clap::{Parser, Subcommand};
use lifestyle_checker::config::AppConfig;
use lifestyle_checker::error::AppError;
use lifestyle_checker::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Lifestyle Checker",
    about = "Score lifestyle questionnaire answers from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the standard lifestyle questionnaire as JSON
    Catalog(CatalogArgs),
    /// Submit answers to the standard questionnaire and print the evaluation
    Evaluate(EvaluateArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(
        environment = ?config.environment,
        minimum_respondent_age = config.questionnaire.minimum_respondent_age,
        "lifestyle checker configured"
    );

    match cli.command {
        Command::Catalog(args) => run_catalog(args),
        Command::Evaluate(args) => run_evaluate(args, &config),
    }
}
