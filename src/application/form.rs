//! Application form fields, parsing and validation

use log::debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::EstimatorConfig;
use crate::error::FieldError;
use crate::product::{find_product, LoanProduct};
use crate::quote::{compute_repayment, Eligibility, RepaymentQuote};

/// Applicant's employment situation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Retired,
}

impl FromStr for EmploymentStatus {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "employed" => Ok(EmploymentStatus::Employed),
            "self_employed" => Ok(EmploymentStatus::SelfEmployed),
            "unemployed" => Ok(EmploymentStatus::Unemployed),
            "retired" => Ok(EmploymentStatus::Retired),
            _ => Err(FieldError::UnknownEmploymentStatus { value: s.to_string() }),
        }
    }
}

/// Parse a user-entered amount
///
/// Surrounding whitespace and `,` grouping separators are ignored.
/// Returns `None` for empty, unparseable or non-finite input.
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Form fields exactly as entered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub product_id: String,
    pub amount: String,
    pub tenure_months: String,
    pub purpose: String,
    /// Monthly take-home pay
    pub net_pay: String,
    pub employment_status: String,
    pub guarantor_name: String,
    pub guarantor_phone: String,
    #[serde(default)]
    pub guarantor_address: String,
    #[serde(default)]
    pub additional_info: String,
}

/// Validated application, serialised as the submission payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub product_id: u64,
    pub amount: f64,
    pub tenure_months: u32,
    pub purpose: String,
    pub net_pay: f64,
    pub employment_status: EmploymentStatus,
    pub guarantor_name: String,
    pub guarantor_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guarantor_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

fn optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required(field: &'static str, text: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let value = optional(text);
    if value.is_none() {
        errors.push(FieldError::Required { field });
    }
    value
}

fn required_number(field: &'static str, text: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
    let raw = required(field, text, errors)?;
    let value = parse_amount(&raw);
    if value.is_none() {
        errors.push(FieldError::NotANumber { field, value: raw });
    }
    value
}

impl ApplicationForm {
    fn selected_product<'a>(&self, products: &'a [LoanProduct]) -> Option<&'a LoanProduct> {
        let id = self.product_id.trim().parse::<u64>().ok()?;
        find_product(products, id).ok()
    }

    fn tenure(&self) -> Option<u32> {
        self.tenure_months.trim().parse::<u32>().ok()
    }

    /// Preview quote for the form as it stands
    ///
    /// Anything that does not parse yet counts as missing, which yields the
    /// zero quote.
    pub fn live_quote(&self, products: &[LoanProduct]) -> RepaymentQuote {
        compute_repayment(
            self.selected_product(products),
            parse_amount(&self.amount).unwrap_or(0.0),
            self.tenure().unwrap_or(0),
        )
    }

    /// Validate the form against the catalog
    ///
    /// Collects every field problem instead of stopping at the first one.
    /// Affordability is only checked once product, amount, tenure and net
    /// pay are all valid.
    pub fn validate(
        &self,
        products: &[LoanProduct],
        config: &EstimatorConfig,
    ) -> Result<LoanApplication, Vec<FieldError>> {
        let mut errors = Vec::new();

        let product = required("product_id", &self.product_id, &mut errors).and_then(|raw| {
            match raw.parse::<u64>() {
                Ok(id) => match find_product(products, id) {
                    Ok(product) => Some(product),
                    Err(_) => {
                        errors.push(FieldError::UnknownProduct { id });
                        None
                    }
                },
                Err(_) => {
                    errors.push(FieldError::NotANumber { field: "product_id", value: raw });
                    None
                }
            }
        });

        let amount = required_number("amount", &self.amount, &mut errors);
        if let (Some(product), Some(amount)) = (product, amount) {
            if product.check_amount(amount).is_err() {
                errors.push(FieldError::AmountOutOfRange {
                    min: product.min_amount,
                    max: product.max_amount,
                });
            }
        }

        let tenure = required("tenure_months", &self.tenure_months, &mut errors).and_then(|raw| {
            let parsed = raw.parse::<u32>().ok();
            if parsed.is_none() {
                errors.push(FieldError::NotANumber { field: "tenure_months", value: raw });
            }
            parsed
        });
        if let (Some(product), Some(tenure)) = (product, tenure) {
            if !product.allows_tenure(tenure) {
                errors.push(FieldError::TenureOutOfRange {
                    min: product.min_tenure_months,
                    max: product.max_tenure_months,
                });
            }
        }

        let purpose = required("purpose", &self.purpose, &mut errors);
        let net_pay = required_number("net_pay", &self.net_pay, &mut errors);

        let employment_status = required("employment_status", &self.employment_status, &mut errors)
            .and_then(|raw| match raw.parse::<EmploymentStatus>() {
                Ok(status) => Some(status),
                Err(e) => {
                    errors.push(e);
                    None
                }
            });

        let guarantor_name = required("guarantor_name", &self.guarantor_name, &mut errors);
        let guarantor_phone = required("guarantor_phone", &self.guarantor_phone, &mut errors);

        if let (true, Some(product), Some(amount), Some(tenure), Some(net_pay)) =
            (errors.is_empty(), product, amount, tenure, net_pay)
        {
            let quote = compute_repayment(Some(product), amount, tenure);
            if !quote.is_finite() {
                errors.push(FieldError::NonFiniteQuote);
            } else {
                let eligibility = Eligibility::assess(&quote, net_pay, config.income_multiple);
                if !eligibility.qualifies {
                    errors.push(FieldError::InsufficientIncome {
                        required_income: eligibility.required_income,
                        net_pay,
                    });
                }
            }
        }

        match (
            product,
            amount,
            tenure,
            purpose,
            net_pay,
            employment_status,
            guarantor_name,
            guarantor_phone,
        ) {
            (
                Some(product),
                Some(amount),
                Some(tenure_months),
                Some(purpose),
                Some(net_pay),
                Some(employment_status),
                Some(guarantor_name),
                Some(guarantor_phone),
            ) if errors.is_empty() => Ok(LoanApplication {
                product_id: product.id,
                amount,
                tenure_months,
                purpose,
                net_pay,
                employment_status,
                guarantor_name,
                guarantor_phone,
                guarantor_address: optional(&self.guarantor_address),
                additional_info: optional(&self.additional_info),
            }),
            _ => {
                debug!("Loan application rejected with {} field error(s)", errors.len());
                Err(errors)
            }
        }
    }
}
