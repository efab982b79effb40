//! Display formatting for money and rates
//!
//! Quotes stay raw `f64` everywhere else; rounding happens only here.

/// Rendered in place of amounts that overflowed
pub const NOT_AVAILABLE: &str = "—";

/// Format an amount as currency with thousands grouping and two decimals
///
/// `format_currency(1234567.891, "₦")` gives `"₦1,234,567.89"`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    if !amount.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{sign}{symbol}{}.{fraction}", group_thousands(whole))
}

/// Format a percentage rate with two decimals, e.g. `"12.00%"`
pub fn format_rate(rate: f64) -> String {
    if !rate.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.2}%", rate)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
