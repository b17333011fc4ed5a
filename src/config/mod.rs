pub mod analysis_conf;
pub mod app_conf;
pub mod kpi_conf;
pub mod mongo_conf;

pub use analysis_conf::AnalysisConfig;
pub use app_conf::AppConfig;
pub use kpi_conf::KpiConfig;
pub use mongo_conf::MongoConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
