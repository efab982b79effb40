//! Estimator configuration
//!
//! Every field has a serde default so a partial (or empty) JSON object is a
//! valid config file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::quote::DEFAULT_INCOME_MULTIPLE;

/// Settings shared by the eligibility check and the display layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Net pay must be at least this multiple of the monthly repayment
    #[serde(default = "default_income_multiple")]
    pub income_multiple: f64,

    /// Currency symbol prefixed to formatted amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Relative tolerance when checking a schedule tenure against its quote
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_income_multiple() -> f64 { DEFAULT_INCOME_MULTIPLE }
fn default_currency_symbol() -> String { "₦".to_string() }
fn default_tolerance() -> f64 { 1e-6 }

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            income_multiple: default_income_multiple(),
            currency_symbol: default_currency_symbol(),
            tolerance: default_tolerance(),
        }
    }
}

impl EstimatorConfig {
    /// Load config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse config from a JSON string
    pub fn from_json(text: &str) -> Result<Self> {
        let config = serde_json::from_str(text)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = EstimatorConfig::from_json("{}").unwrap();
        assert_eq!(config.income_multiple, 2.0);
        assert_eq!(config.currency_symbol, "₦");
    }

    #[test]
    fn test_partial_override() {
        let config = EstimatorConfig::from_json(r#"{"income_multiple": 3.0}"#).unwrap();
        assert_eq!(config.income_multiple, 3.0);
        assert_eq!(config.tolerance, 1e-6);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(EstimatorConfig::from_json("{not json").is_err());
    }
}
