//! Loan application form
//!
//! The form keeps every field exactly as typed. [`ApplicationForm::live_quote`]
//! recomputes the preview on each change from whatever parses so far, and
//! [`ApplicationForm::validate`] turns a finished form into the payload that is
//! submitted to the loan applications endpoint.

mod form;

pub use form::{
    ApplicationForm, LoanApplication, EmploymentStatus, parse_amount,
};
