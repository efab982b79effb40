//! Loan product terms as served by the cooperative's REST API

use serde::{Deserialize, Deserializer, Serialize};
use std::ops::RangeInclusive;

use crate::error::{EstimatorError, Result};

/// Interest convention of a loan product
///
/// The backend sends a free-form tag. Only `"compound"` selects compounding;
/// every other value (or no value at all) falls back to simple interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    #[default]
    Simple,
    Compound,
}

impl InterestType {
    /// Map a backend tag to an interest convention
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("compound") {
            InterestType::Compound
        } else {
            InterestType::Simple
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterestType::Simple => "simple",
            InterestType::Compound => "compound",
        }
    }
}

impl<'de> Deserialize<'de> for InterestType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(tag.as_deref().map(InterestType::from_tag).unwrap_or_default())
    }
}

impl std::fmt::Display for InterestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loan product offered by the cooperative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProduct {
    #[serde(deserialize_with = "flexible::id")]
    pub id: u64,

    pub name: String,

    /// Interest rate in percent per tenure unit (month)
    #[serde(deserialize_with = "flexible::number")]
    pub interest_rate: f64,

    #[serde(default)]
    pub interest_type: InterestType,

    /// Smallest principal the product lends
    #[serde(deserialize_with = "flexible::number")]
    pub min_amount: f64,

    /// Largest principal the product lends
    #[serde(deserialize_with = "flexible::number")]
    pub max_amount: f64,

    #[serde(deserialize_with = "flexible::months")]
    pub min_tenure_months: u32,

    #[serde(deserialize_with = "flexible::months")]
    pub max_tenure_months: u32,

    /// One-off fee charged on disbursement, in percent of principal
    #[serde(default, deserialize_with = "flexible::number_or_zero")]
    pub processing_fee_percentage: f64,
}

impl LoanProduct {
    /// Every selectable tenure, in months
    ///
    /// Empty when the product's minimum exceeds its maximum.
    pub fn tenure_options(&self) -> RangeInclusive<u32> {
        self.min_tenure_months..=self.max_tenure_months
    }

    /// Is this tenure one of the selectable options?
    pub fn allows_tenure(&self, months: u32) -> bool {
        self.tenure_options().contains(&months)
    }

    /// Check a tenure against the product's range
    pub fn check_tenure(&self, months: u32) -> Result<()> {
        if self.allows_tenure(months) {
            Ok(())
        } else {
            Err(EstimatorError::TenureOutOfRange {
                months,
                min: self.min_tenure_months,
                max: self.max_tenure_months,
            })
        }
    }

    /// Check a requested principal against the product's bounds (inclusive)
    pub fn check_amount(&self, amount: f64) -> Result<()> {
        if amount >= self.min_amount && amount <= self.max_amount {
            Ok(())
        } else {
            Err(EstimatorError::AmountOutOfRange {
                amount,
                min: self.min_amount,
                max: self.max_amount,
            })
        }
    }

    /// Processing fee for a principal
    ///
    /// Informational; it is not part of the repayment total.
    pub fn processing_fee(&self, principal: f64) -> f64 {
        principal * self.processing_fee_percentage / 100.0
    }

    /// Check the product's own invariants
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| EstimatorError::InvalidProduct {
            id: self.id,
            reason: reason.to_string(),
        };

        let numbers = [
            self.interest_rate,
            self.min_amount,
            self.max_amount,
            self.processing_fee_percentage,
        ];
        if numbers.iter().any(|n| !n.is_finite()) {
            return Err(invalid("non-finite numeric term"));
        }
        if self.interest_rate < 0.0 {
            return Err(invalid("negative interest rate"));
        }
        if self.processing_fee_percentage < 0.0 {
            return Err(invalid("negative processing fee"));
        }
        if self.min_amount > self.max_amount {
            return Err(invalid("min_amount exceeds max_amount"));
        }
        if self.min_tenure_months > self.max_tenure_months {
            return Err(invalid("min_tenure_months exceeds max_tenure_months"));
        }
        Ok(())
    }
}

/// Deserializers that accept both JSON numbers and numeric strings.
/// Decimal columns come out of the API as strings such as `"12.00"`.
pub(super) mod flexible {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    /// Ids stay integral end to end; a round trip through `f64` would
    /// corrupt anything above 2^53.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Integer(u64),
        Text(String),
    }

    fn parse_text<E: Error>(text: &str) -> Result<f64, E> {
        let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
        cleaned
            .parse::<f64>()
            .map_err(|_| E::custom(format!("invalid number: {text:?}")))
    }

    fn raw_to_f64<E: Error>(raw: Raw) -> Result<f64, E> {
        match raw {
            Raw::Number(n) => Ok(n),
            Raw::Text(text) => parse_text(&text),
        }
    }

    fn whole<E: Error>(value: f64, max: f64) -> Result<f64, E> {
        if value.fract() != 0.0 || value < 0.0 || value > max {
            return Err(E::custom(format!("expected a non-negative integer, got {value}")));
        }
        Ok(value)
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        raw_to_f64(Raw::deserialize(deserializer)?)
    }

    pub fn number_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            Some(raw) => raw_to_f64(raw),
            None => Ok(0.0),
        }
    }

    pub fn months<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = raw_to_f64(Raw::deserialize(deserializer)?)?;
        Ok(whole::<D::Error>(value, u32::MAX as f64)? as u32)
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match RawId::deserialize(deserializer)? {
            RawId::Integer(id) => Ok(id),
            RawId::Text(text) => text
                .trim()
                .parse::<u64>()
                .map_err(|_| D::Error::custom(format!("invalid id: {text:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn housing_loan() -> LoanProduct {
        LoanProduct {
            id: 1,
            name: "Housing Loan".to_string(),
            interest_rate: 12.0,
            interest_type: InterestType::Simple,
            min_amount: 100_000.0,
            max_amount: 5_000_000.0,
            min_tenure_months: 6,
            max_tenure_months: 24,
            processing_fee_percentage: 1.5,
        }
    }

    #[test]
    fn test_interest_type_tags() {
        assert_eq!(InterestType::from_tag("compound"), InterestType::Compound);
        assert_eq!(InterestType::from_tag(" Compound "), InterestType::Compound);
        assert_eq!(InterestType::from_tag("simple"), InterestType::Simple);
        assert_eq!(InterestType::from_tag("flat"), InterestType::Simple);
        assert_eq!(InterestType::from_tag(""), InterestType::Simple);
    }

    #[test]
    fn test_deserialize_string_decimals() {
        let json = r#"{
            "id": "7",
            "name": "Car Loan",
            "interest_rate": "2.50",
            "interest_type": "compound",
            "min_amount": "50,000.00",
            "max_amount": 2000000,
            "min_tenure_months": 3,
            "max_tenure_months": "12",
            "processing_fee_percentage": null
        }"#;
        let product: LoanProduct = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, 7);
        assert_eq!(product.interest_rate, 2.5);
        assert_eq!(product.interest_type, InterestType::Compound);
        assert_eq!(product.min_amount, 50_000.0);
        assert_eq!(product.max_tenure_months, 12);
        assert_eq!(product.processing_fee_percentage, 0.0);
    }

    #[test]
    fn test_missing_or_null_interest_type_is_simple() {
        let json = r#"{"id": 1, "name": "A", "interest_rate": 5, "interest_type": null,
            "min_amount": 1, "max_amount": 2, "min_tenure_months": 1, "max_tenure_months": 2}"#;
        let product: LoanProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.interest_type, InterestType::Simple);

        let json = r#"{"id": 1, "name": "A", "interest_rate": 5,
            "min_amount": 1, "max_amount": 2, "min_tenure_months": 1, "max_tenure_months": 2}"#;
        let product: LoanProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.interest_type, InterestType::Simple);
    }

    #[test]
    fn test_large_ids_are_exact() {
        let json = r#"{"id": 9007199254740993, "name": "A", "interest_rate": 5,
            "min_amount": 1, "max_amount": 2, "min_tenure_months": 1, "max_tenure_months": 2}"#;
        let product: LoanProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 9_007_199_254_740_993);

        let json = r#"{"id": "18446744073709551615", "name": "A", "interest_rate": 5,
            "min_amount": 1, "max_amount": 2, "min_tenure_months": 1, "max_tenure_months": 2}"#;
        let product: LoanProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, u64::MAX);

        let json = r#"{"id": "1.5", "name": "A", "interest_rate": 5,
            "min_amount": 1, "max_amount": 2, "min_tenure_months": 1, "max_tenure_months": 2}"#;
        assert!(serde_json::from_str::<LoanProduct>(json).is_err());
    }

    #[test]
    fn test_fractional_tenure_rejected() {
        let json = r#"{"id": 1, "name": "A", "interest_rate": 5,
            "min_amount": 1, "max_amount": 2, "min_tenure_months": 1.5, "max_tenure_months": 2}"#;
        assert!(serde_json::from_str::<LoanProduct>(json).is_err());
    }

    #[test]
    fn test_tenure_options() {
        let product = housing_loan();
        let options: Vec<u32> = product.tenure_options().collect();

        assert_eq!(options.len(), 19);
        assert_eq!(options.first(), Some(&6));
        assert_eq!(options.last(), Some(&24));
        assert!(product.allows_tenure(24));
        assert!(!product.allows_tenure(25));
        assert!(product.check_tenure(5).is_err());
    }

    #[test]
    fn test_inverted_tenure_has_no_options() {
        let product = LoanProduct {
            min_tenure_months: 12,
            max_tenure_months: 6,
            ..housing_loan()
        };
        assert_eq!(product.tenure_options().count(), 0);
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_amount_bounds_inclusive() {
        let product = housing_loan();
        assert!(product.check_amount(100_000.0).is_ok());
        assert!(product.check_amount(5_000_000.0).is_ok());
        assert!(matches!(
            product.check_amount(99_999.99),
            Err(EstimatorError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_processing_fee() {
        let product = housing_loan();
        assert!((product.processing_fee(1_000_000.0) - 15_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate() {
        assert!(housing_loan().validate().is_ok());

        let negative = LoanProduct { interest_rate: -1.0, ..housing_loan() };
        assert!(negative.validate().is_err());

        let inverted = LoanProduct { min_amount: 10.0, max_amount: 1.0, ..housing_loan() };
        assert!(inverted.validate().is_err());
    }
}
