//! Diagnostics for hosts scoring activities. Scoring output goes to stdout, so
//! log records are written to stderr.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("FOOTPRINT_LOG_LEVEL holds an unusable directive '{directives}'")]
    InvalidDirectives {
        directives: String,
        #[source]
        source: ParseError,
    },
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the footprint subscriber once per process. Directives from
/// `RUST_LOG` replace `FOOTPRINT_LOG_LEVEL` entirely.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| directives(&config.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

fn directives(raw: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(raw).map_err(|source| TelemetryError::InvalidDirectives {
        directives: raw.to_string(),
        source,
    })
}
