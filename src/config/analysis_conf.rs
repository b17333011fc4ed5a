use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// External report-analysis endpoint.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// `None` leaves the report endpoint unavailable.
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl AnalysisConfig {
    /// Load analysis configuration from environment variables
    ///
    /// - ANALYSIS_URL: endpoint receiving the production digest (optional)
    /// - ANALYSIS_API_KEY: bearer token (optional)
    /// - ANALYSIS_TIMEOUT_SECS: request timeout (defaults to 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading analysis configuration from environment variables");
        let url = env::var("ANALYSIS_URL").ok().filter(|u| !u.trim().is_empty());
        if url.is_none() {
            warn!("ANALYSIS_URL not set, analysis reports are disabled");
        }
        let api_key = env::var("ANALYSIS_API_KEY").ok().filter(|k| !k.is_empty());
        let timeout_secs = env::var("ANALYSIS_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid ANALYSIS_TIMEOUT_SECS value");
                ConfigError::InvalidValue("Invalid ANALYSIS_TIMEOUT_SECS value".to_string())
            })?;
        let config = AnalysisConfig { url, api_key, timeout_secs };
        config.validate()?;
        debug!(configured = config.url.is_some(), timeout_secs, "Analysis configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationError(format!("ANALYSIS_URL must be http(s): {}", url)));
            }
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError("Analysis timeout must be greater than 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let mut config = AnalysisConfig { url: Some("https://analysis.local/v1/summarize".to_string()), api_key: None, timeout_secs: 30 };
        assert!(config.validate().is_ok());
        config.url = Some("ftp://nope".to_string());
        assert!(config.validate().is_err());
        config.url = None;
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
