//! Loan Estimator - repayment previews for cooperative loan products
//!
//! This library provides:
//! - Loan product catalog loading (JSON from the REST API, or CSV)
//! - Simple and compound repayment quotes
//! - Net-pay eligibility checks and month-by-month repayment schedules
//! - Loan application form parsing and validation
//! - Currency formatting for display

pub mod error;
pub mod config;
pub mod product;
pub mod quote;
pub mod application;
pub mod format;

// Re-export commonly used types
pub use error::{EstimatorError, FieldError, Result};
pub use config::EstimatorConfig;
pub use product::{LoanProduct, InterestType};
pub use quote::{compute_repayment, RepaymentQuote, Eligibility, RepaymentSchedule};
pub use application::{ApplicationForm, LoanApplication};
