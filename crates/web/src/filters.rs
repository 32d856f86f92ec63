//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a whole number of đồng with `.` thousands separators.
///
/// Usage in templates: `{{ plan.price|vnd }}` renders `25000` as `25.000đ`.
#[askama::filter_fn]
pub fn vnd(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_vnd(&amount.to_string()))
}

fn format_vnd(digits: &str) -> String {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped.push('đ');
    grouped
}
