//! Currency amount normalization for statement balances and limits.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::patterns::{AMOUNT_CLEAN, AMOUNT_NOISE, CURRENCY_MARKER};
use crate::error::FieldError;

/// Parse a captured amount such as `₹45,230.50`, `Rs. 1,00,000` or `12345.67`.
pub fn parse_amount(raw: &str) -> Result<Decimal, FieldError> {
    let without_currency = CURRENCY_MARKER.replace_all(raw, "");
    let cleaned = AMOUNT_NOISE.replace_all(&without_currency, "");
    // Sentence punctuation directly after the number
    let cleaned = cleaned.trim_end_matches('.');

    if cleaned.is_empty() {
        return Err(FieldError::normalization(raw, "no digits"));
    }

    if !AMOUNT_CLEAN.is_match(cleaned) {
        return Err(FieldError::normalization(raw, "non-numeric residue"));
    }

    Decimal::from_str(cleaned).map_err(|e| FieldError::normalization(raw, e.to_string()))
}

/// Format amount with Indian digit grouping (₹1,00,000.00).
pub fn format_inr_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    // Last three digits form one group, the rest are grouped in pairs
    let head_len = chars.len().saturating_sub(3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i < head_len && (head_len - i) % 2 == 0 {
            formatted.push(',');
        }
        if i > 0 && i == head_len {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}₹{}.{}", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount_variants() {
        assert_eq!(parse_amount("12,345.00").unwrap(), dec("12345.00"));
        assert_eq!(parse_amount("₹45,230.50").unwrap(), dec("45230.50"));
        assert_eq!(parse_amount("Rs. 1,00,000").unwrap(), dec("100000"));
        assert_eq!(parse_amount("INR 2500").unwrap(), dec("2500"));
        assert_eq!(parse_amount("100,000.").unwrap(), dec("100000"));
    }

    #[test]
    fn test_clean_input_is_idempotent() {
        assert_eq!(parse_amount("12,345.67").unwrap(), parse_amount("12345.67").unwrap());
    }

    #[test]
    fn test_rejects_residue() {
        assert!(parse_amount("12,3a4").is_err());
        assert!(parse_amount(",").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("1.2.3").is_err());
    }

    #[test]
    fn test_format_inr_amount() {
        assert_eq!(format_inr_amount(dec("100000")), "₹1,00,000.00");
        assert_eq!(format_inr_amount(dec("45230.5")), "₹45,230.50");
        assert_eq!(format_inr_amount(dec("999")), "₹999.00");
        assert_eq!(format_inr_amount(dec("12345678.9")), "₹1,23,45,678.90");
    }
}
