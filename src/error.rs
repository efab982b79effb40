//! Error types for product loading and application validation.
//!
//! The repayment calculator itself never fails; everything here belongs to
//! the layers wrapped around it.

use thiserror::Error;

/// A specialized Result type for estimator operations.
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// The main error type for the estimator library.
#[derive(Error, Debug)]
pub enum EstimatorError {
    /// Reading a product catalog or config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON payload could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV payload could not be decoded.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Catalog file has an extension we do not know how to read.
    #[error("Unsupported catalog format: {path}")]
    UnsupportedFormat {
        /// Offending path.
        path: String,
    },

    /// No product with the requested id.
    #[error("Loan product not found: {id}")]
    ProductNotFound {
        /// Requested product id.
        id: u64,
    },

    /// Product data breaks one of its own invariants.
    #[error("Invalid loan product {id}: {reason}")]
    InvalidProduct {
        /// Product id.
        id: u64,
        /// What is wrong with it.
        reason: String,
    },

    /// Requested principal is outside the product's bounds.
    #[error("Amount {amount} is outside the allowed range {min}..={max}")]
    AmountOutOfRange {
        /// Requested principal.
        amount: f64,
        /// Product minimum.
        min: f64,
        /// Product maximum.
        max: f64,
    },

    /// Requested tenure is outside the product's range.
    #[error("Tenure of {months} months is outside the allowed range {min}..={max}")]
    TenureOutOfRange {
        /// Requested tenure.
        months: u32,
        /// Product minimum tenure.
        min: u32,
        /// Product maximum tenure.
        max: u32,
    },

    /// The quote overflowed to a non-finite value.
    #[error("Repayment quote is not finite for a tenure of {months} months")]
    NonFiniteQuote {
        /// Tenure that produced the overflow.
        months: u32,
    },
}

/// A problem with one field of a loan application form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Field left empty.
    #[error("{field} is required")]
    Required {
        /// Form field name.
        field: &'static str,
    },

    /// Field does not parse as a number.
    #[error("{field} must be a number, got {value:?}")]
    NotANumber {
        /// Form field name.
        field: &'static str,
        /// Text as entered.
        value: String,
    },

    /// Selected product is not in the catalog.
    #[error("Unknown loan product {id}")]
    UnknownProduct {
        /// Selected product id.
        id: u64,
    },

    /// Amount outside the product's bounds.
    #[error("Amount must be between {min} and {max}")]
    AmountOutOfRange {
        /// Product minimum.
        min: f64,
        /// Product maximum.
        max: f64,
    },

    /// Tenure not one of the product's options.
    #[error("Tenure must be between {min} and {max} months")]
    TenureOutOfRange {
        /// Product minimum tenure.
        min: u32,
        /// Product maximum tenure.
        max: u32,
    },

    /// Employment status not recognised.
    #[error("Unknown employment status {value:?}")]
    UnknownEmploymentStatus {
        /// Text as entered.
        value: String,
    },

    /// Net pay does not cover the repayment often enough.
    #[error("Net pay of {net_pay} is below the required {required_income}")]
    InsufficientIncome {
        /// Minimum net pay for the quote.
        required_income: f64,
        /// Net pay as stated.
        net_pay: f64,
    },

    /// Repayment estimate overflowed.
    #[error("Repayment estimate is too large to compute")]
    NonFiniteQuote,
}

impl FieldError {
    /// Name of the form field this error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Required { field } | FieldError::NotANumber { field, .. } => *field,
            FieldError::UnknownProduct { .. } => "product_id",
            FieldError::AmountOutOfRange { .. } => "amount",
            FieldError::TenureOutOfRange { .. } => "tenure_months",
            FieldError::UnknownEmploymentStatus { .. } => "employment_status",
            FieldError::InsufficientIncome { .. } | FieldError::NonFiniteQuote => "net_pay",
        }
    }
}
