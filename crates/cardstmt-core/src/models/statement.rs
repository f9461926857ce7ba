//! Statement record models returned to callers.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The five fields extracted from every statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Masked card/account number.
    AccountNumber,
    /// Billing cycle start and end.
    StatementPeriod,
    /// Total amount due.
    TotalBalance,
    /// Payment due date.
    PaymentDueDate,
    /// Credit limit.
    CreditLimit,
}

impl Field {
    /// All fields, in canonical report order.
    pub const ALL: [Field; 5] = [
        Field::AccountNumber,
        Field::StatementPeriod,
        Field::TotalBalance,
        Field::PaymentDueDate,
        Field::CreditLimit,
    ];

    /// Field name as it appears in output records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::AccountNumber => "account_number",
            Field::StatementPeriod => "statement_period",
            Field::TotalBalance => "total_balance",
            Field::PaymentDueDate => "payment_due_date",
            Field::CreditLimit => "credit_limit",
        }
    }

    /// Name of the bank profile pattern that recovers this field.
    pub fn pattern_name(&self) -> &'static str {
        match self {
            Field::AccountNumber => "account_pattern",
            Field::StatementPeriod => "statement_period_pattern",
            Field::TotalBalance => "balance_pattern",
            Field::PaymentDueDate => "due_date_pattern",
            Field::CreditLimit => "credit_limit_pattern",
        }
    }

    /// Number of capture groups the field's pattern must declare.
    pub fn capture_groups(&self) -> usize {
        match self {
            Field::StatementPeriod => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing cycle covered by a statement. `start` is never after `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// How the statement text was obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Text recovered from a PDF document.
    Pdf,
    /// Plain text handed in by the caller.
    #[default]
    Text,
}

/// A successfully identified statement with its normalized fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStatement {
    /// Registered bank key.
    pub bank: String,

    /// Masked account number, e.g. `****1234`.
    pub account_number: Option<String>,

    pub statement_period: Option<StatementPeriod>,

    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_balance: Option<Decimal>,

    pub payment_due_date: Option<NaiveDate>,

    #[serde(with = "rust_decimal::serde::float_option")]
    pub credit_limit: Option<Decimal>,

    /// Share of the five fields recovered, 0-100 in steps of 20.
    pub confidence_score: u8,

    /// Fields that were not found or failed normalization.
    pub missing_fields: Vec<Field>,

    /// Normalization issues encountered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Extraction metadata.
    #[serde(default)]
    pub metadata: ExtractionMetadata,
}

impl ParsedStatement {
    /// Whether every field was recovered.
    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }
}

/// A statement that could not be processed past text extraction or bank
/// identification. Carries diagnostics only, never field data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedStatement {
    /// Single-line reason.
    pub error: String,

    /// Registered bank keys, reported when identification failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_banks: Vec<String>,

    /// Leading slice of the recovered text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_preview: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

impl FailedStatement {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            supported_banks: Vec::new(),
            text_preview: None,
            source_file: None,
        }
    }
}

/// Final output of the pipeline for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatementRecord {
    Parsed(ParsedStatement),
    Failed(FailedStatement),
}

impl StatementRecord {
    pub fn parsed(&self) -> Option<&ParsedStatement> {
        match self {
            StatementRecord::Parsed(p) => Some(p),
            StatementRecord::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            StatementRecord::Parsed(_) => None,
            StatementRecord::Failed(f) => Some(&f.error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatementRecord::Failed(_))
    }
}

/// Metadata about the extraction process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub extraction_method: ExtractionMethod,

    /// File name of the source document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    /// Size of the source document in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,

    /// Text backend that produced the statement text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_backend: Option<String>,

    /// Length of the statement text in characters.
    pub text_length: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}
