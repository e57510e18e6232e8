//! Estimator configuration
//!
//! Precedence: built-in defaults, then an optional JSON file, then
//! environment overrides (`PLANT_DATA`, `ET_DATA`, `TIER_RATE`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SavingsError;

/// LADWP Tier 2 residential rate, dollars per hundred cubic feet
pub const DEFAULT_TIER_RATE_PER_HCF: f64 = 5.50;

/// Number of example botanical names shown per plant type
pub const DEFAULT_EXAMPLE_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Plant reference table (WUCOLS export, CSV)
    pub plant_reference_path: PathBuf,
    /// Periodic reference ET table (CIMIS export, CSV)
    pub et_path: PathBuf,
    /// Dollars per HCF
    pub tier_rate_per_hcf: f64,
    /// Caption shown next to cost figures
    pub rate_label: String,
    /// Rows are retained only if one of their tags is in this set
    pub inclusion_tags: Vec<String>,
    pub example_limit: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            plant_reference_path: PathBuf::from("data/wucols_los_angeles.csv"),
            et_path: PathBuf::from("data/daily_eto_variance.csv"),
            tier_rate_per_hcf: DEFAULT_TIER_RATE_PER_HCF,
            rate_label: "LADWP Tier 2 Residential".to_string(),
            inclusion_tags: vec![
                "California Native".to_string(),
                "Ornamental Grass".to_string(),
            ],
            example_limit: DEFAULT_EXAMPLE_LIMIT,
        }
    }
}

impl EstimatorConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: EstimatorConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config JSON: {:?}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `PLANT_DATA`, `ET_DATA` and `TIER_RATE` from the environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(
            std::env::var("PLANT_DATA").ok(),
            std::env::var("ET_DATA").ok(),
            std::env::var("TIER_RATE").ok(),
        )
    }

    fn apply_overrides(
        mut self,
        plant_data: Option<String>,
        et_data: Option<String>,
        tier_rate: Option<String>,
    ) -> Result<Self> {
        if let Some(path) = plant_data {
            self.plant_reference_path = PathBuf::from(path);
        }
        if let Some(path) = et_data {
            self.et_path = PathBuf::from(path);
        }
        if let Some(rate) = tier_rate {
            self.tier_rate_per_hcf = rate
                .trim()
                .parse()
                .with_context(|| format!("TIER_RATE is not a number: '{}'", rate))?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject configuration the engine cannot run with
    pub fn validate(&self) -> std::result::Result<(), SavingsError> {
        if !self.tier_rate_per_hcf.is_finite() || self.tier_rate_per_hcf < 0.0 {
            return Err(SavingsError::data_load(
                "configuration",
                format!("tier rate must be a non-negative number, got {}", self.tier_rate_per_hcf),
            ));
        }
        if self.inclusion_tags.iter().all(|tag| tag.trim().is_empty()) {
            return Err(SavingsError::data_load(
                "configuration",
                "inclusion tag set is empty",
            ));
        }
        if self.example_limit == 0 {
            return Err(SavingsError::data_load(
                "configuration",
                "example limit must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EstimatorConfig::default();
        assert_eq!(config.tier_rate_per_hcf, 5.50);
        assert_eq!(config.example_limit, 5);
        assert!(config.inclusion_tags.contains(&"Ornamental Grass".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EstimatorConfig =
            serde_json::from_str(r#"{ "tier_rate_per_hcf": 7.25 }"#).unwrap();
        assert_eq!(config.tier_rate_per_hcf, 7.25);
        assert_eq!(config.example_limit, DEFAULT_EXAMPLE_LIMIT);
    }

    #[test]
    fn test_overrides() {
        let config = EstimatorConfig::default()
            .apply_overrides(Some("plants.csv".into()), None, Some(" 6.10 ".into()))
            .unwrap();
        assert_eq!(config.plant_reference_path, PathBuf::from("plants.csv"));
        assert_eq!(config.tier_rate_per_hcf, 6.10);
    }

    #[test]
    fn test_invalid_rate_rejected() {
        assert!(EstimatorConfig::default()
            .apply_overrides(None, None, Some("cheap".into()))
            .is_err());

        let config = EstimatorConfig {
            tier_rate_per_hcf: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_inclusion_set_rejected() {
        let config = EstimatorConfig {
            inclusion_tags: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
