//! Cadence configuration
//!
//! All settings have working defaults; a TOML file only needs the keys it
//! wants to override.
//!
//! ```toml
//! log_filter = "debug"
//!
//! [scheduling]
//! materialize_safety_cap = 52
//!
//! [outreach]
//! default_step_delay_days = 4
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Recurring task settings
    pub scheduling: SchedulingConfig,
    /// Drip campaign settings
    pub outreach: OutreachConfig,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            scheduling: SchedulingConfig::default(),
            outreach: OutreachConfig::default(),
        }
    }
}

/// Recurring task settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Upper bound on occurrences created by a single eager materialization
    pub materialize_safety_cap: usize,
    /// Create every future occurrence when a recurring task is created,
    /// instead of only the first one
    pub eager_materialization: bool,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            materialize_safety_cap: 100,
            eager_materialization: true,
        }
    }
}

/// Drip campaign settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutreachConfig {
    /// Delay used when a prospect's step has no entry in its campaign's policy
    pub default_step_delay_days: u32,
    /// Amount placed on deals created by conversion
    pub default_deal_value: Decimal,
    /// ISO currency code for converted deals
    pub currency: String,
    /// Win probability (percent) for converted deals
    pub default_win_probability: u8,
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            default_step_delay_days: 3,
            default_deal_value: Decimal::ZERO,
            currency: "USD".into(),
            default_win_probability: 10,
        }
    }
}

impl CadenceConfig {
    /// Parse from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from a file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(String),

    #[error("config parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CadenceConfig::default();
        assert_eq!(config.scheduling.materialize_safety_cap, 100);
        assert!(config.scheduling.eager_materialization);
        assert_eq!(config.outreach.default_step_delay_days, 3);
        assert_eq!(config.outreach.default_win_probability, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CadenceConfig::from_toml(
            r#"
            [outreach]
            default_step_delay_days = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.outreach.default_step_delay_days, 5);
        assert_eq!(config.outreach.currency, "USD");
        assert_eq!(config.scheduling, SchedulingConfig::default());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(matches!(
            CadenceConfig::from_toml("scheduling = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = CadenceConfig::load("/definitely/not/here/cadence.toml").unwrap();
        assert_eq!(config, CadenceConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = CadenceConfig::default();
        config.scheduling.materialize_safety_cap = 12;
        let text = config.to_toml().unwrap();
        assert_eq!(CadenceConfig::from_toml(&text).unwrap(), config);
    }
}
