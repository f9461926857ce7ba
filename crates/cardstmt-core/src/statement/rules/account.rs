//! Card/account number masking.

use crate::error::FieldError;

/// Masking marker placed before the visible digits.
pub const MASK: &str = "****";

/// Reduce a captured card number to its masked four-digit suffix.
///
/// Accepts fully masked (`****1234`), partially masked
/// (`4375 XXXX XXXX 5678`) and plain card numbers.
pub fn mask_account_number(raw: &str) -> Result<String, FieldError> {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() < 4 {
        return Err(FieldError::normalization(
            raw,
            format!("expected at least 4 digits, found {}", digits.len()),
        ));
    }

    let suffix: String = digits[digits.len() - 4..].iter().collect();
    Ok(format!("{}{}", MASK, suffix))
}
