//! Text formatting helpers shared by tables, cards and badges.

use crate::models::ClaimStatus;
use chrono::{DateTime, NaiveDate, Utc};

/// Display text for a raw status string.
///
/// Known statuses use their canonical label whatever casing the backend
/// used; anything else is title-cased word by word.
pub fn format_status_text(raw: &str) -> String {
    if let Some(status) = ClaimStatus::canonicalize(raw) {
        return status.label().to_string();
    }

    raw.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Format an amount as US dollars: `1234.5` -> `"$1,234.50"`.
pub fn format_currency(amount: f64) -> String {
    format_currency_with_symbol(amount, "$")
}

/// Format an amount with thousands separators, two decimals and `symbol`.
pub fn format_currency_with_symbol(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{fraction:02}")
}

/// Format an optional date, showing a dash when absent.
pub fn format_date(date: Option<NaiveDate>, format: &str) -> String {
    date.map(|d| d.format(format).to_string())
        .unwrap_or_else(|| "—".to_string())
}

pub fn format_datetime(datetime: Option<DateTime<Utc>>, format: &str) -> String {
    datetime
        .map(|dt| dt.format(format).to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Truncate to `max` characters, ending with an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_for_known_and_unknown_values() {
        assert_eq!(format_status_text("inreview"), "In Review");
        assert_eq!(format_status_text("in progress"), "In Progress");
        assert_eq!(format_status_text("approved"), "Approved");
        assert_eq!(format_status_text("awaiting_payment"), "Awaiting Payment");
        assert_eq!(format_status_text(""), "");
    }

    #[test]
    fn currency_grouping_and_rounding() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-42.1), "-$42.10");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer sentence", 8), "a longe…");
    }
}
