//! PDF text backends using lopdf and pdf-extract.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::{Result, TextExtractor};
use crate::error::PdfError;

/// Load a document, decrypting it when it only carries an empty user password.
/// The flag reports whether decryption happened.
fn load_document(data: &[u8]) -> Result<(Document, bool)> {
    let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

    let decrypted = doc.is_encrypted();
    if decrypted {
        if doc.decrypt("").is_err() {
            return Err(PdfError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");
    }

    if doc.get_pages().is_empty() {
        return Err(PdfError::NoPages);
    }

    Ok((doc, decrypted))
}

/// Text backend built on the `pdf-extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractBackend;

impl PdfExtractBackend {
    pub fn new() -> Self {
        Self
    }

    /// Extract text from an in-memory PDF.
    pub fn extract_from_mem(&self, data: &[u8]) -> Result<String> {
        let (mut doc, decrypted) = load_document(data)?;

        // pdf-extract cannot decrypt, so hand it the decrypted bytes.
        let bytes: Cow<'_, [u8]> = if decrypted {
            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            Cow::Owned(decrypted)
        } else {
            Cow::Borrowed(data)
        };

        // pdf-extract panics on some malformed font tables
        let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes))
            .map_err(|_| PdfError::TextExtraction("pdf-extract panicked".to_string()))?
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        debug!("pdf-extract recovered {} characters", text.len());
        Ok(text)
    }
}

impl TextExtractor for PdfExtractBackend {
    fn name(&self) -> &'static str {
        "pdf_extract"
    }

    fn extract_text(&self, path: &Path) -> Result<String> {
        let data = fs::read(path)?;
        self.extract_from_mem(&data)
    }
}

/// Text backend walking page content streams with `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }

    /// Extract text from an in-memory PDF.
    pub fn extract_from_mem(&self, data: &[u8]) -> Result<String> {
        let (doc, _) = load_document(data)?;
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();

        let mut text = String::new();
        for page in pages {
            match doc.extract_text(&[page]) {
                Ok(page_text) => {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(&page_text);
                }
                Err(e) => debug!("lopdf could not read page {}: {}", page, e),
            }
        }

        debug!("lopdf recovered {} characters", text.len());
        Ok(text)
    }
}

impl TextExtractor for LopdfBackend {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract_text(&self, path: &Path) -> Result<String> {
        let data = fs::read(path)?;
        self.extract_from_mem(&data)
    }
}
