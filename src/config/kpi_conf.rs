use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

pub const DEFAULT_TARGET_YEAR: i32 = 2025;

/// Production KPI settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiConfig {
    /// Year whose whole production is booked to January. `None` disables it.
    pub live_year: Option<i32>,
    /// Target year used when the requested year has no targets.
    pub default_target_year: i32,
}

impl KpiConfig {
    /// Load KPI configuration from environment variables
    ///
    /// - KPI_LIVE_YEAR: live year, or `none` to disable (defaults to 2025)
    /// - KPI_DEFAULT_TARGET_YEAR: fallback target year (defaults to 2025)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading KPI configuration from environment variables");
        let live_year = match env::var("KPI_LIVE_YEAR") {
            Ok(raw) => parse_live_year(&raw)?,
            Err(_) => {
                warn!("KPI_LIVE_YEAR not set, using default: {}", DEFAULT_TARGET_YEAR);
                Some(DEFAULT_TARGET_YEAR)
            }
        };
        let default_target_year = match env::var("KPI_DEFAULT_TARGET_YEAR") {
            Ok(raw) => raw.trim().parse::<i32>().map_err(|_| {
                error!("Invalid KPI_DEFAULT_TARGET_YEAR value: {}", raw);
                ConfigError::InvalidValue(format!("Invalid KPI_DEFAULT_TARGET_YEAR value: {}", raw))
            })?,
            Err(_) => DEFAULT_TARGET_YEAR,
        };
        debug!(?live_year, default_target_year, "KPI configuration loaded");
        Ok(KpiConfig { live_year, default_target_year })
    }
}

fn parse_live_year(raw: &str) -> Result<Option<i32>, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") || raw.eq_ignore_ascii_case("off") {
        return Ok(None);
    }
    raw.parse::<i32>().map(Some).map_err(|_| {
        error!("Invalid KPI_LIVE_YEAR value: {}", raw);
        ConfigError::InvalidValue(format!("Invalid KPI_LIVE_YEAR value: {}", raw))
    })
}

impl Default for KpiConfig {
    fn default() -> Self {
        KpiConfig {
            live_year: Some(DEFAULT_TARGET_YEAR),
            default_target_year: DEFAULT_TARGET_YEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_live_year() {
        assert_eq!(parse_live_year("2024").unwrap(), Some(2024));
        assert_eq!(parse_live_year("none").unwrap(), None);
        assert_eq!(parse_live_year("  ").unwrap(), None);
        assert!(parse_live_year("next year").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = KpiConfig::default();
        assert_eq!(config.live_year, Some(2025));
        assert_eq!(config.default_target_year, 2025);
    }
}
