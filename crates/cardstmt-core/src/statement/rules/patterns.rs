//! Common regex patterns used while normalizing captured values.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Currency markers printed next to amounts
    pub static ref CURRENCY_MARKER: Regex = Regex::new(
        r"(?i)₹|\bINR\b|\bRs\b\.?"
    ).unwrap();

    // Thousands separators and padding inside an amount
    pub static ref AMOUNT_NOISE: Regex = Regex::new(
        r"[,\s\u{00a0}]"
    ).unwrap();

    // A clean decimal amount
    pub static ref AMOUNT_CLEAN: Regex = Regex::new(
        r"^\d+(?:\.\d+)?$"
    ).unwrap();

    // Separators between date components
    pub static ref DATE_SEPARATOR: Regex = Regex::new(
        r"[\s./,\-]+"
    ).unwrap();
}
