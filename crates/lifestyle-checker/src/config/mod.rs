use std::env;
use std::fmt;

use crate::questionnaire::service::DEFAULT_MINIMUM_AGE;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the checker.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub questionnaire: QuestionnaireConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let minimum_respondent_age = match env::var("CHECKER_MIN_RESPONDENT_AGE") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidMinimumAge(raw))?,
            Err(_) => DEFAULT_MINIMUM_AGE,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            questionnaire: QuestionnaireConfig {
                minimum_respondent_age,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Rules applied on the response submission path.
#[derive(Debug, Clone)]
pub struct QuestionnaireConfig {
    pub minimum_respondent_age: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidMinimumAge(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMinimumAge(value) => write!(
                f,
                "CHECKER_MIN_RESPONDENT_AGE must be a whole number of years, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
