//! Error types for the cardstmt-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the cardstmt library.
#[derive(Error, Debug)]
pub enum CardStmtError {
    /// Text could not be recovered from the statement document.
    #[error(transparent)]
    Pdf(#[from] PdfError),

    /// No registered bank signature matched the statement text.
    #[error("Bank not detected")]
    UnknownBank,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be parsed or serialized.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF text extraction.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The input file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input file does not carry a `.pdf` extension.
    #[error("File must be a PDF")]
    NotPdf,

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// A backend failed to extract text.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Every backend came back empty or failed.
    #[error("Could not extract text from PDF. PDF might be image-based or corrupted.")]
    NoText,

    /// I/O error while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while registering a bank profile.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// One of the five patterns was not supplied.
    #[error("bank {bank} is missing {field}")]
    IncompletePattern { bank: String, field: &'static str },

    /// A pattern failed to compile.
    #[error("invalid {field} for bank {bank}: {source}")]
    InvalidPattern {
        bank: String,
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    /// A pattern has the wrong number of capture groups.
    #[error("{field} for bank {bank} must have {expected} capture group(s), found {found}")]
    UnexpectedGroups {
        bank: String,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// The bank key is already registered.
    #[error("bank {0} is already registered")]
    DuplicateBank(String),

    /// The bank has no signature tokens to identify it by.
    #[error("bank {0} has no signatures")]
    NoSignatures(String),
}

/// Per-field extraction problems. These are recorded, never raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field's pattern did not match.
    #[error("not found")]
    NotFound,

    /// The field matched but its value could not be normalized.
    #[error("could not normalize '{raw}': {reason}")]
    Normalization { raw: String, reason: String },
}

impl FieldError {
    pub fn normalization(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Normalization {
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for the cardstmt library.
pub type Result<T> = std::result::Result<T, CardStmtError>;
