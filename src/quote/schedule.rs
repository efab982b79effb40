//! Month-by-month repayment schedule derived from a quote
//!
//! Every month repays the same amount (`quote.monthly`). The final row takes
//! up any floating-point residue so the schedule always closes at exactly
//! `quote.total` with nothing remaining.

use log::debug;
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::RepaymentQuote;
use crate::error::Result;

/// One month of the repayment schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Month number (1-indexed)
    pub month: u32,
    /// Amount repaid this month
    pub payment: f64,
    /// Total repaid up to and including this month
    pub cumulative_paid: f64,
    /// Amount still owed after this month
    pub remaining: f64,
}

/// Repayment schedule for a quote
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepaymentSchedule {
    pub rows: Vec<ScheduleRow>,
}

impl RepaymentSchedule {
    /// Build the schedule for a quote over its tenure
    ///
    /// Empty for the zero quote, a zero tenure, or a non-finite quote. Also
    /// empty when `tenure_months` is not the tenure the quote was computed
    /// for, i.e. `monthly * tenure_months` misses `total` by more than
    /// `tolerance` relative to the total.
    pub fn from_quote(quote: &RepaymentQuote, tenure_months: u32, tolerance: f64) -> Self {
        if quote.is_zero() || tenure_months == 0 || !quote.is_finite() {
            return Self::default();
        }

        let mismatch = (quote.monthly * tenure_months as f64 - quote.total).abs();
        if mismatch > tolerance * quote.total.abs().max(1.0) {
            debug!(
                "Schedule tenure {} does not match quote (monthly={} total={})",
                tenure_months, quote.monthly, quote.total
            );
            return Self::default();
        }

        let mut rows = Vec::with_capacity(tenure_months as usize);
        let mut paid = 0.0;

        for month in 1..=tenure_months {
            let payment = if month == tenure_months {
                quote.total - paid
            } else {
                quote.monthly
            };
            paid += payment;

            let remaining = if month == tenure_months {
                0.0
            } else {
                (quote.total - paid).max(0.0)
            };

            rows.push(ScheduleRow {
                month,
                payment,
                cumulative_paid: if month == tenure_months { quote.total } else { paid },
                remaining,
            });
        }

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all payments
    pub fn total_paid(&self) -> f64 {
        self.rows.last().map(|r| r.cumulative_paid).unwrap_or(0.0)
    }

    /// Write the schedule as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    #[test]
    fn test_schedule_closes_at_total() {
        let quote = RepaymentQuote {
            monthly: 2_440_000.0 / 12.0,
            total: 2_440_000.0,
            interest: 1_440_000.0,
        };
        let schedule = RepaymentSchedule::from_quote(&quote, 12, TOLERANCE);

        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule.rows[0].month, 1);
        assert!((schedule.rows[0].remaining - (2_440_000.0 - quote.monthly)).abs() < 1e-6);

        let last = schedule.rows.last().unwrap();
        assert_eq!(last.month, 12);
        assert_eq!(last.remaining, 0.0);
        assert_eq!(last.cumulative_paid, 2_440_000.0);
        assert_eq!(schedule.total_paid(), 2_440_000.0);
        assert!((last.payment - quote.monthly).abs() < 1e-6);
    }

    #[test]
    fn test_remaining_decreases() {
        let quote = RepaymentQuote { monthly: 100.0, total: 700.0, interest: 50.0 };
        let schedule = RepaymentSchedule::from_quote(&quote, 7, TOLERANCE);

        for pair in schedule.rows.windows(2) {
            assert!(pair[1].remaining <= pair[0].remaining);
        }
    }

    #[test]
    fn test_zero_quote_has_empty_schedule() {
        assert!(RepaymentSchedule::from_quote(&RepaymentQuote::ZERO, 12, TOLERANCE).is_empty());

        let quote = RepaymentQuote { monthly: f64::INFINITY, total: f64::INFINITY, interest: f64::INFINITY };
        assert!(RepaymentSchedule::from_quote(&quote, 12, TOLERANCE).is_empty());
    }

    #[test]
    fn test_write_csv() {
        let quote = RepaymentQuote { monthly: 50.0, total: 100.0, interest: 0.0 };
        let schedule = RepaymentSchedule::from_quote(&quote, 2, TOLERANCE);

        let mut buffer = Vec::new();
        schedule.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "month,payment,cumulative_paid,remaining");
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("2,"));
    }

    #[test]
    fn test_tenure_mismatch_gives_empty_schedule() {
        let quote = RepaymentQuote { monthly: 100.0, total: 1_200.0, interest: 200.0 };

        assert!(RepaymentSchedule::from_quote(&quote, 24, TOLERANCE).is_empty());
        assert!(RepaymentSchedule::from_quote(&quote, 6, TOLERANCE).is_empty());

        let schedule = RepaymentSchedule::from_quote(&quote, 12, TOLERANCE);
        assert_eq!(schedule.len(), 12);
        assert!(schedule.rows.iter().all(|r| r.payment >= 0.0));
        assert_eq!(schedule.rows[11].remaining, 0.0);
    }
}
