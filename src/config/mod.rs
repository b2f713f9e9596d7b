use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the platform.
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

/// Top-level configuration for hosts embedding the rewards engine.
#[derive(Debug, Clone)]
pub struct RewardsConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub overrides: RewardOverrides,
}

impl RewardsConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let overrides = RewardOverrides {
            stadium_tokens: optional_token_count("REWARD_STADIUM_TOKENS")?,
            away_tokens: optional_token_count("REWARD_AWAY_TOKENS")?,
            home_tokens: optional_token_count("REWARD_HOME_TOKENS")?,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            overrides,
        })
    }
}

fn optional_token_count(var: &'static str) -> Result<Option<u32>, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidTokenCount { var, value: raw }),
        Err(_) => Ok(None),
    }
}

/// Optional base-token overrides for the check-in reward tariff. Absent
/// variables leave the production defaults in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewardOverrides {
    pub stadium_tokens: Option<u32>,
    pub away_tokens: Option<u32>,
    pub home_tokens: Option<u32>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTokenCount { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTokenCount { var, value } => {
                write!(f, "{var} must be a non-negative token count, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
