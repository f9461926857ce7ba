//! Raw field capture using a bank's patterns.

use crate::models::statement::Field;

use super::registry::BankProfile;

/// Raw text captured for one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawCapture {
    Single(String),
    /// Start and end of the statement period.
    Pair(String, String),
    #[default]
    Absent,
}

impl RawCapture {
    pub fn is_absent(&self) -> bool {
        matches!(self, RawCapture::Absent)
    }
}

/// Raw captures for all five fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCaptures {
    pub account_number: RawCapture,
    pub statement_period: RawCapture,
    pub total_balance: RawCapture,
    pub payment_due_date: RawCapture,
    pub credit_limit: RawCapture,
}

impl RawCaptures {
    pub fn get(&self, field: Field) -> &RawCapture {
        match field {
            Field::AccountNumber => &self.account_number,
            Field::StatementPeriod => &self.statement_period,
            Field::TotalBalance => &self.total_balance,
            Field::PaymentDueDate => &self.payment_due_date,
            Field::CreditLimit => &self.credit_limit,
        }
    }

    fn slot(&mut self, field: Field) -> &mut RawCapture {
        match field {
            Field::AccountNumber => &mut self.account_number,
            Field::StatementPeriod => &mut self.statement_period,
            Field::TotalBalance => &mut self.total_balance,
            Field::PaymentDueDate => &mut self.payment_due_date,
            Field::CreditLimit => &mut self.credit_limit,
        }
    }
}

/// Apply each of the profile's patterns to the text independently.
///
/// The first match of each pattern is used. A failed match leaves that field
/// absent without affecting the others.
pub fn extract_fields(text: &str, profile: &BankProfile) -> RawCaptures {
    let mut captures = RawCaptures::default();

    for field in Field::ALL {
        *captures.slot(field) = capture_field(text, profile, field);
    }

    captures
}

fn capture_field(text: &str, profile: &BankProfile, field: Field) -> RawCapture {
    let Some(caps) = profile.pattern(field).captures(text) else {
        return RawCapture::Absent;
    };

    let group = |i: usize| {
        caps.get(i)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    };

    match field.capture_groups() {
        2 => match (group(1), group(2)) {
            (Some(start), Some(end)) => RawCapture::Pair(start, end),
            _ => RawCapture::Absent,
        },
        _ => group(1).map(RawCapture::Single).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::registry::PatternRegistry;
    use pretty_assertions::assert_eq;

    const HDFC_TEXT: &str = "HDFC Bank Credit Card Statement
Card Number: 4375 XXXX XXXX 1234
Statement Period: 01-Sep-2024 to 30-Sep-2024
Total Amount Due: ₹45,230.50
Payment Due Date: 25/10/2024
Credit Limit: ₹2,00,000";

    #[test]
    fn test_extract_all_fields() {
        let registry = PatternRegistry::builtin();
        let profile = registry.get("HDFC").unwrap();
        let caps = extract_fields(HDFC_TEXT, profile);

        assert_eq!(caps.account_number, RawCapture::Single("4375 XXXX XXXX 1234".into()));
        assert_eq!(
            caps.statement_period,
            RawCapture::Pair("01-Sep-2024".into(), "30-Sep-2024".into())
        );
        assert_eq!(caps.total_balance, RawCapture::Single("45,230.50".into()));
        assert_eq!(caps.payment_due_date, RawCapture::Single("25/10/2024".into()));
        assert_eq!(caps.credit_limit, RawCapture::Single("2,00,000".into()));
    }

    #[test]
    fn test_missing_anchor_leaves_others_intact() {
        let registry = PatternRegistry::builtin();
        let profile = registry.get("HDFC").unwrap();
        let text = HDFC_TEXT.replace("Credit Limit", "Reward Points");
        let caps = extract_fields(&text, profile);

        assert!(caps.credit_limit.is_absent());
        assert!(!caps.total_balance.is_absent());
        assert!(!caps.account_number.is_absent());
    }

    #[test]
    fn test_period_with_start_only_is_absent() {
        let registry = PatternRegistry::builtin();
        let profile = registry.get("HDFC").unwrap();
        let caps = extract_fields("HDFC\nStatement Period: 01-Sep-2024 onwards", profile);
        assert!(caps.statement_period.is_absent());
    }
}
