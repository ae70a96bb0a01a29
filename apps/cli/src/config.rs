//! # Pricer Configuration
//!
//! Fee schedule and row defaults for a pricing run.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     pricer --msf 12.5 batch products.csv                               │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     PRICER_MSF_PCT=12.5                                                │
//! │     PRICER_MANDATORY_DISCOUNT_PCT=3                                    │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config path, or                                                  │
//! │     ~/.config/pricer/pricer.toml (Linux)                               │
//! │     ~/Library/Application Support/com.marketplace.pricer/pricer.toml   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     Published marketplace rates, 5% mandatory discount                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricer.toml
//! [fees]
//! msf_pct = 11.66
//! payment_pct = 3.38
//! premium_pct = 4.28
//! campaign_pct = 5.35
//!
//! [defaults]
//! mandatory_discount_pct = 5.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use pricer_core::validation::{validate_fee_pct, validate_fee_schedule};
use pricer_core::{FeeSchedule, ValidationError, DEFAULT_MANDATORY_DISCOUNT_PCT};
use pricer_io::RowDefaults;

// =============================================================================
// Row Defaults
// =============================================================================

/// Values used for blank spreadsheet cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultsSettings {
    /// Mandatory discount applied when `MandDisc` is blank.
    #[serde(default = "default_mandatory_discount")]
    pub mandatory_discount_pct: f64,
}

fn default_mandatory_discount() -> f64 {
    DEFAULT_MANDATORY_DISCOUNT_PCT
}

impl Default for DefaultsSettings {
    fn default() -> Self {
        DefaultsSettings {
            mandatory_discount_pct: default_mandatory_discount(),
        }
    }
}

// =============================================================================
// Fee Overrides
// =============================================================================

/// Fee rates given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeeOverrides {
    pub msf_pct: Option<f64>,
    pub payment_pct: Option<f64>,
    pub premium_pct: Option<f64>,
    pub campaign_pct: Option<f64>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete pricer configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricerConfig {
    /// Marketplace fee rates.
    #[serde(default)]
    pub fees: FeeSchedule,

    /// Blank-cell defaults.
    #[serde(default)]
    pub defaults: DefaultsSettings,
}

impl PricerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pricer.toml)
    /// 3. Environment variables
    ///
    /// Command-line flags are applied afterwards with
    /// [`PricerConfig::apply_overrides`].
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading pricer config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::ReadFailed {
                        path: path.clone(),
                        source,
                    }
                })?;
                config = Self::from_toml(&contents)?;
            } else if explicit {
                return Err(ConfigError::NotFound(path));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration. Call after all overrides are applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_fee_schedule(&self.fees)?;
        validate_fee_pct("mandatory_discount_pct", self.defaults.mandatory_discount_pct)?;
        Ok(())
    }

    /// Applies command-line fee flags on top of everything else.
    pub fn apply_overrides(&mut self, overrides: &FeeOverrides) {
        let fees = &mut self.fees;
        for (slot, value) in [
            (&mut fees.msf_pct, overrides.msf_pct),
            (&mut fees.payment_pct, overrides.payment_pct),
            (&mut fees.premium_pct, overrides.premium_pct),
            (&mut fees.campaign_pct, overrides.campaign_pct),
        ] {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies `PRICER_*` overrides read through `lookup`. Values that do not
    /// parse as numbers are ignored with a warning.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fees = &mut self.fees;
        let defaults = &mut self.defaults;

        for (key, slot) in [
            ("PRICER_MSF_PCT", &mut fees.msf_pct),
            ("PRICER_PAYMENT_PCT", &mut fees.payment_pct),
            ("PRICER_PREMIUM_PCT", &mut fees.premium_pct),
            ("PRICER_CAMPAIGN_PCT", &mut fees.campaign_pct),
            (
                "PRICER_MANDATORY_DISCOUNT_PCT",
                &mut defaults.mandatory_discount_pct,
            ),
        ] {
            let Some(raw) = lookup(key) else {
                continue;
            };

            match raw.trim().parse::<f64>() {
                Ok(v) => {
                    debug!(key, value = v, "Overriding from environment");
                    *slot = v;
                }
                Err(_) => warn!(key, value = %raw, "Ignoring unparseable environment override"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "marketplace", "pricer")
            .map(|dirs| dirs.config_dir().join("pricer.toml"))
    }

    /// Blank-cell defaults in the form the importer takes.
    pub fn row_defaults(&self) -> RowDefaults {
        RowDefaults {
            mandatory_discount_pct: self.defaults.mandatory_discount_pct,
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot read config file {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = PricerConfig::default();
        assert_eq!(config.fees, FeeSchedule::default());
        assert_eq!(config.defaults.mandatory_discount_pct, 5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PricerConfig::from_toml(
            r#"
            [fees]
            msf_pct = 12.5
            "#,
        )
        .unwrap();

        assert_eq!(config.fees.msf_pct, 12.5);
        assert_eq!(config.fees.payment_pct, FeeSchedule::default().payment_pct);
        assert_eq!(config.defaults, DefaultsSettings::default());
    }

    #[test]
    fn test_full_toml() {
        let config = PricerConfig::from_toml(
            r#"
            [fees]
            msf_pct = 10
            payment_pct = 3.0
            premium_pct = 4.0
            campaign_pct = 5.0

            [defaults]
            mandatory_discount_pct = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.fees, FeeSchedule::new(10.0, 3.0, 4.0, 5.0));
        assert_eq!(config.row_defaults().mandatory_discount_pct, 0.0);
    }

    #[test]
    fn test_malformed_toml() {
        let result = PricerConfig::from_toml("[fees]
msf_pct = \"high\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("PRICER_MSF_PCT", "9.5"),
            ("PRICER_PREMIUM_PCT", " 0 "),
            ("PRICER_CAMPAIGN_PCT", "lots"),
            ("PRICER_MANDATORY_DISCOUNT_PCT", "3"),
        ]);
        let mut config = PricerConfig::default();
        config.apply_overrides_from(|k| vars.get(k).cloned());

        assert_eq!(config.fees.msf_pct, 9.5);
        assert_eq!(config.fees.payment_pct, 3.38);
        assert_eq!(config.fees.premium_pct, 0.0);
        assert_eq!(config.fees.campaign_pct, 5.35);
        assert_eq!(config.defaults.mandatory_discount_pct, 3.0);
    }

    #[test]
    fn test_flag_overrides() {
        let mut config = PricerConfig::default();
        config.apply_overrides(&FeeOverrides {
            payment_pct: Some(2.0),
            campaign_pct: Some(0.0),
            ..Default::default()
        });

        assert_eq!(config.fees, FeeSchedule::new(11.66, 2.0, 4.28, 0.0));
    }

    #[test]
    fn test_validation() {
        let mut config = PricerConfig::default();
        config.fees.premium_pct = 150.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = PricerConfig::default();
        config.defaults.mandatory_discount_pct = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = PricerConfig::load(Some(PathBuf::from("/nonexistent/pricer.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
