//! Net-pay affordability rule
//!
//! An applicant qualifies when their stated monthly net pay covers the
//! monthly repayment a fixed number of times over (twice, by default).

use serde::{Deserialize, Serialize};

use super::RepaymentQuote;

/// Net pay must be at least this multiple of the monthly repayment
pub const DEFAULT_INCOME_MULTIPLE: f64 = 2.0;

/// Outcome of checking a stated net pay against a quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eligibility {
    /// Minimum net pay needed for this quote
    pub required_income: f64,
    /// Net pay the applicant stated
    pub net_pay: f64,
    /// Net pay covers the requirement and the quote is non-zero
    pub qualifies: bool,
    /// How far short the net pay falls (0 when it does not)
    pub shortfall: f64,
}

impl Eligibility {
    /// Assess a stated net pay against a quote
    ///
    /// A zero quote never qualifies, whatever the net pay.
    pub fn assess(quote: &RepaymentQuote, net_pay: f64, income_multiple: f64) -> Self {
        let required_income = quote.monthly * income_multiple;
        let qualifies = net_pay >= required_income && quote.monthly > 0.0;
        Self {
            required_income,
            net_pay,
            qualifies,
            shortfall: (required_income - net_pay).max(0.0),
        }
    }

    /// Assess with the default income multiple
    pub fn with_default_multiple(quote: &RepaymentQuote, net_pay: f64) -> Self {
        Self::assess(quote, net_pay, DEFAULT_INCOME_MULTIPLE)
    }
}
