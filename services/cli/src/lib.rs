mod cli;
mod commands;

use lifestyle_checker::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
