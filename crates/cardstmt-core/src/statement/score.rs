//! Confidence scoring.

use crate::models::statement::Field;

use super::normalize::NormalizedFields;

/// Points awarded per recovered field.
pub const POINTS_PER_FIELD: u8 = 20;

/// Completeness of a normalized statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    /// 20 points per present field, 0 to 100.
    pub confidence_score: u8,
    /// Absent fields in canonical order.
    pub missing_fields: Vec<Field>,
}

pub fn assess(fields: &NormalizedFields) -> Assessment {
    let (present, missing): (Vec<Field>, Vec<Field>) =
        Field::ALL.into_iter().partition(|f| fields.is_present(*f));

    Assessment {
        confidence_score: POINTS_PER_FIELD * present.len() as u8,
        missing_fields: missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_empty_scores_zero() {
        let assessment = assess(&NormalizedFields::default());
        assert_eq!(assessment.confidence_score, 0);
        assert_eq!(assessment.missing_fields, Field::ALL.to_vec());
    }

    #[test]
    fn test_partial_score() {
        let fields = NormalizedFields {
            account_number: Some("****1234".into()),
            total_balance: Some(Decimal::from(500)),
            payment_due_date: NaiveDate::from_ymd_opt(2025, 1, 5),
            ..Default::default()
        };
        let assessment = assess(&fields);

        assert_eq!(assessment.confidence_score, 60);
        assert_eq!(
            assessment.missing_fields,
            vec![Field::StatementPeriod, Field::CreditLimit]
        );
        assert_eq!(
            assessment.confidence_score as usize,
            100 - 20 * assessment.missing_fields.len()
        );
    }
}
