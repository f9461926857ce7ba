//! Conversion of raw captures into typed field values.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::FieldError;
use crate::models::statement::{Field, StatementPeriod};

use super::fields::{RawCapture, RawCaptures};
use super::rules::{mask_account_number, parse_amount, parse_statement_date, DateOrder};

/// Normalized field values. A field is `None` when it was not captured or
/// its capture could not be normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedFields {
    pub account_number: Option<String>,
    pub statement_period: Option<StatementPeriod>,
    pub total_balance: Option<Decimal>,
    pub payment_due_date: Option<NaiveDate>,
    pub credit_limit: Option<Decimal>,
    /// Why each absent field is absent.
    pub issues: Vec<(Field, FieldError)>,
}

impl NormalizedFields {
    pub fn is_present(&self, field: Field) -> bool {
        match field {
            Field::AccountNumber => self.account_number.is_some(),
            Field::StatementPeriod => self.statement_period.is_some(),
            Field::TotalBalance => self.total_balance.is_some(),
            Field::PaymentDueDate => self.payment_due_date.is_some(),
            Field::CreditLimit => self.credit_limit.is_some(),
        }
    }

    /// Human-readable notes for captures that failed normalization.
    pub fn warnings(&self) -> Vec<String> {
        self.issues
            .iter()
            .filter(|(_, e)| matches!(e, FieldError::Normalization { .. }))
            .map(|(field, e)| format!("{}: {}", field, e))
            .collect()
    }

    fn record<T>(&mut self, field: Field, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Field {} rejected: {}", field, e);
                self.issues.push((field, e));
                None
            }
        }
    }
}

/// Normalize every raw capture. Failures are recorded per field and never
/// abort the others.
pub fn normalize(raw: &RawCaptures, date_order: DateOrder) -> NormalizedFields {
    let mut out = NormalizedFields::default();

    let account = single(raw.get(Field::AccountNumber)).and_then(mask_account_number);
    let account = out.record(Field::AccountNumber, account);
    out.account_number = account;

    let period = normalize_period(raw.get(Field::StatementPeriod), date_order);
    let period = out.record(Field::StatementPeriod, period);
    out.statement_period = period;

    let balance = single(raw.get(Field::TotalBalance)).and_then(parse_amount);
    let balance = out.record(Field::TotalBalance, balance);
    out.total_balance = balance;

    let due = single(raw.get(Field::PaymentDueDate))
        .and_then(|s| parse_statement_date(s, date_order));
    let due = out.record(Field::PaymentDueDate, due);
    out.payment_due_date = due;

    let limit = single(raw.get(Field::CreditLimit)).and_then(parse_amount);
    let limit = out.record(Field::CreditLimit, limit);
    out.credit_limit = limit;

    out
}

fn single(capture: &RawCapture) -> Result<&str, FieldError> {
    match capture {
        RawCapture::Single(s) => Ok(s),
        RawCapture::Pair(a, _) => Ok(a),
        RawCapture::Absent => Err(FieldError::NotFound),
    }
}

fn normalize_period(capture: &RawCapture, order: DateOrder) -> Result<StatementPeriod, FieldError> {
    let RawCapture::Pair(start, end) = capture else {
        return Err(FieldError::NotFound);
    };

    let start_date = parse_statement_date(start, order)?;
    let end_date = parse_statement_date(end, order)?;

    if start_date > end_date {
        return Err(FieldError::normalization(
            format!("{} to {}", start, end),
            "period starts after it ends",
        ));
    }

    Ok(StatementPeriod {
        start: start_date,
        end: end_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn captures() -> RawCaptures {
        RawCaptures {
            account_number: RawCapture::Single("****5678".into()),
            statement_period: RawCapture::Pair("01/07/2025".into(), "31/07/2025".into()),
            total_balance: RawCapture::Single("12,345.00".into()),
            payment_due_date: RawCapture::Single("15/08/2025".into()),
            credit_limit: RawCapture::Single("100,000".into()),
        }
    }

    #[test]
    fn test_normalize_complete() {
        let fields = normalize(&captures(), DateOrder::DayMonthYear);

        assert_eq!(fields.account_number.as_deref(), Some("****5678"));
        assert_eq!(
            fields.statement_period,
            Some(StatementPeriod {
                start: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
            })
        );
        assert_eq!(fields.total_balance, Some(Decimal::from_str("12345.00").unwrap()));
        assert_eq!(fields.payment_due_date, NaiveDate::from_ymd_opt(2025, 8, 15));
        assert_eq!(fields.credit_limit, Some(Decimal::from(100_000)));
        assert!(fields.issues.is_empty());
    }

    #[test]
    fn test_bad_value_is_absent_with_warning() {
        let mut raw = captures();
        raw.payment_due_date = RawCapture::Single("31/02/2025".into());
        let fields = normalize(&raw, DateOrder::DayMonthYear);

        assert!(fields.payment_due_date.is_none());
        assert!(fields.total_balance.is_some());
        assert_eq!(fields.warnings().len(), 1);
        assert!(fields.warnings()[0].starts_with("payment_due_date"));
    }

    #[test]
    fn test_inverted_period_rejected() {
        let mut raw = captures();
        raw.statement_period = RawCapture::Pair("31/07/2025".into(), "01/07/2025".into());
        let fields = normalize(&raw, DateOrder::DayMonthYear);
        assert!(!fields.is_present(Field::StatementPeriod));
    }

    #[test]
    fn test_absent_is_not_a_warning() {
        let mut raw = captures();
        raw.credit_limit = RawCapture::Absent;
        let fields = normalize(&raw, DateOrder::DayMonthYear);

        assert!(!fields.is_present(Field::CreditLimit));
        assert_eq!(fields.issues, vec![(Field::CreditLimit, FieldError::NotFound)]);
        assert!(fields.warnings().is_empty());
    }
}
