//! PDF text extraction module.
//!
//! The statement pipeline only depends on [`TextExtractor`]; concrete
//! backends live in [`extractor`] and are chained by [`FallbackTextExtractor`].

mod extractor;
mod fallback;

pub use extractor::{LopdfBackend, PdfExtractBackend};
pub use fallback::FallbackTextExtractor;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Available text backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBackendKind {
    /// `pdf-extract` crate.
    PdfExtract,
    /// `lopdf` content-stream text extraction.
    Lopdf,
}

impl TextBackendKind {
    /// Construct the backend.
    pub fn build(self) -> Box<dyn TextExtractor> {
        match self {
            TextBackendKind::PdfExtract => Box::new(PdfExtractBackend::new()),
            TextBackendKind::Lopdf => Box::new(LopdfBackend::new()),
        }
    }
}

/// Text recovered from a document, with the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub backend: &'static str,
}

/// Capability "extract text from this document or fail".
pub trait TextExtractor: Send + Sync {
    /// Short backend name, reported in record metadata.
    fn name(&self) -> &'static str;

    /// Extract the full text of the document at `path`.
    fn extract_text(&self, path: &Path) -> Result<String>;

    /// Extract text and report which backend produced it.
    fn extract(&self, path: &Path) -> Result<ExtractedText> {
        Ok(ExtractedText {
            text: self.extract_text(path)?,
            backend: self.name(),
        })
    }
}

/// Check that `path` exists and names a PDF file.
pub fn check_pdf_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PdfError::NotFound(path.to_path_buf()));
    }

    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if !is_pdf {
        return Err(PdfError::NotPdf);
    }

    Ok(())
}
