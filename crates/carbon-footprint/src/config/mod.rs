use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of deployment.
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

/// Top-level configuration for hosts embedding the footprint model.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub data: DataConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("FOOTPRINT_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data = DataConfig {
            taxonomy_path: path_var("FOOTPRINT_TAXONOMY_PATH")?,
            rates_path: path_var("FOOTPRINT_RATES_PATH")?,
            reference_rates_path: path_var("FOOTPRINT_REFERENCE_RATES_PATH")?,
            cpi_path: path_var("FOOTPRINT_CPI_PATH")?,
        };

        let log_level = env::var("FOOTPRINT_LOG_LEVEL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        Ok(Self {
            environment,
            data,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Locations of the reference documents. `None` selects the bundled copy.
#[derive(Debug, Clone, Default)]
pub struct DataConfig {
    pub taxonomy_path: Option<PathBuf>,
    pub rates_path: Option<PathBuf>,
    pub reference_rates_path: Option<PathBuf>,
    pub cpi_path: Option<PathBuf>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn path_var(name: &'static str) -> Result<Option<PathBuf>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(PathBuf::from(value.trim()))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicode { variable: name }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    NonUnicode { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonUnicode { variable } => {
                write!(f, "{variable} must be valid unicode")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
