//! Repayment estimator for simple and compound interest products

use log::debug;
use serde::{Deserialize, Serialize};

use crate::product::{InterestType, LoanProduct};

/// Estimated repayment for a principal over a tenure
///
/// Recomputed from scratch on every input change and never stored.
/// Values are raw floats; rounding belongs to the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RepaymentQuote {
    /// Repayment per month
    pub monthly: f64,
    /// Principal plus interest
    pub total: f64,
    /// Interest over the whole tenure
    pub interest: f64,
}

impl RepaymentQuote {
    /// Quote returned while the form is still incomplete
    pub const ZERO: RepaymentQuote = RepaymentQuote {
        monthly: 0.0,
        total: 0.0,
        interest: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// False when compounding over a very long tenure overflowed
    pub fn is_finite(&self) -> bool {
        self.monthly.is_finite() && self.total.is_finite() && self.interest.is_finite()
    }
}

/// Compute the repayment quote for a product, principal and tenure
///
/// Returns [`RepaymentQuote::ZERO`] when there is no product yet, or when the
/// principal or tenure is not positive. Amount bounds and tenure membership
/// are not checked here.
///
/// Simple interest charges `interest_rate`% of the principal once per month:
/// `total = P * (1 + r * n)`. Compound interest grows the principal by
/// `(1 + r)` each month: `total = P * (1 + r)^n`. Here `r = interest_rate / 100`.
pub fn compute_repayment(
    product: Option<&LoanProduct>,
    principal: f64,
    tenure_months: u32,
) -> RepaymentQuote {
    let product = match product {
        Some(p) if principal > 0.0 && tenure_months > 0 => p,
        _ => return RepaymentQuote::ZERO,
    };

    let rate = product.interest_rate / 100.0;
    let periods = tenure_months as f64;

    let (total, interest) = match product.interest_type {
        InterestType::Compound => {
            let total = principal * (1.0 + rate).powf(periods);
            (total, total - principal)
        }
        InterestType::Simple => {
            let interest = principal * rate * periods;
            (principal + interest, interest)
        }
    };

    let quote = RepaymentQuote {
        monthly: total / periods,
        total,
        interest,
    };

    debug!(
        "Quote for product {} ({}): principal={} tenure={} -> monthly={} total={}",
        product.id, product.interest_type, principal, tenure_months, quote.monthly, quote.total
    );

    quote
}
