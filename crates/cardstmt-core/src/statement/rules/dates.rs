//! Date normalization for statement due dates and billing periods.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patterns::DATE_SEPARATOR;
use crate::error::FieldError;

/// Component order a bank prints its dates in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// 25/10/2024, 01-Sep-2024
    #[default]
    DayMonthYear,
    /// 10/25/2024, Sep 01 2024
    MonthDayYear,
    /// 2024-10-25
    YearMonthDay,
}

/// Parse a captured date in the given component order.
///
/// Components may be separated by `-`, `/`, `.`, `,` or whitespace; the month
/// may be numeric or an English month name. Two-digit years are accepted.
pub fn parse_statement_date(raw: &str, order: DateOrder) -> Result<NaiveDate, FieldError> {
    let parts: Vec<&str> = DATE_SEPARATOR
        .split(raw.trim())
        .filter(|p| !p.is_empty())
        .collect();

    let [a, b, c] = parts.as_slice() else {
        return Err(FieldError::normalization(raw, "expected three date components"));
    };

    let (day, month, year) = match order {
        DateOrder::DayMonthYear => (*a, *b, *c),
        DateOrder::MonthDayYear => (*b, *a, *c),
        DateOrder::YearMonthDay => (*c, *b, *a),
    };

    let day: u32 = day
        .parse()
        .map_err(|_| FieldError::normalization(raw, "invalid day"))?;
    let month = parse_month(month).ok_or_else(|| FieldError::normalization(raw, "invalid month"))?;
    let year = parse_year(year).ok_or_else(|| FieldError::normalization(raw, "invalid year"))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| FieldError::normalization(raw, "impossible date"))
}

fn parse_year(s: &str) -> Option<i32> {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let year: i32 = s.parse().ok()?;
    match s.len() {
        // Two-digit year: assume 2000s for 00-50, 1900s for 51-99
        2 if year <= 50 => Some(2000 + year),
        2 => Some(1900 + year),
        4 => Some(year),
        _ => None,
    }
}

fn parse_month(s: &str) -> Option<u32> {
    if let Ok(month) = s.parse::<u32>() {
        return (1..=12).contains(&month).then_some(month);
    }

    let lower = s.to_lowercase();
    let month = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };

    // Reject words that merely start like a month ("marker", "decimal")
    let full = [
        "january", "february", "march", "april", "may", "june", "july", "august",
        "september", "october", "november", "december",
    ][month as usize - 1];
    let is_name = full.starts_with(lower.as_str()) || lower == "sept";

    is_name.then_some(month)
}
