//! Core library for credit-card statement field extraction.
//!
//! This crate provides:
//! - PDF text extraction with ordered backend fallback
//! - Issuing bank identification from statement text
//! - Per-bank pattern registry for the five statement fields
//! - Normalization of card numbers, amounts and dates, with confidence scoring

pub mod error;
pub mod models;
pub mod pdf;
pub mod statement;

pub use error::{CardStmtError, FieldError, PdfError, RegistryError, Result};
pub use models::config::CardStmtConfig;
pub use models::statement::{
    ExtractionMetadata, ExtractionMethod, FailedStatement, Field, ParsedStatement,
    StatementPeriod, StatementRecord,
};
pub use pdf::{FallbackTextExtractor, TextBackendKind, TextExtractor};
pub use statement::{BankDefinition, PatternRegistry, StatementParser};
