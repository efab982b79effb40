//! Repayment quotes, eligibility and repayment schedules

mod estimator;
mod eligibility;
pub mod schedule;

pub use estimator::{compute_repayment, RepaymentQuote};
pub use eligibility::{Eligibility, DEFAULT_INCOME_MULTIPLE};
pub use schedule::{RepaymentSchedule, ScheduleRow};
