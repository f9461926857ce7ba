//! Ordered fallback across text backends.

use std::path::Path;

use tracing::{debug, warn};

use super::{check_pdf_path, ExtractedText, Result, TextExtractor};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Tries each backend in turn until one yields enough text.
pub struct FallbackTextExtractor {
    backends: Vec<Box<dyn TextExtractor>>,
    min_text_length: usize,
}

impl FallbackTextExtractor {
    /// Create an extractor over explicit backends.
    pub fn new(backends: Vec<Box<dyn TextExtractor>>) -> Self {
        Self {
            backends,
            min_text_length: PdfConfig::default().min_text_length,
        }
    }

    /// Build the backend chain described by the configuration.
    pub fn from_config(config: &PdfConfig) -> Self {
        let backends = config.backends.iter().map(|kind| kind.build()).collect();
        Self::new(backends).with_min_text_length(config.min_text_length)
    }

    /// Set the text length below which the next backend is tried.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    /// Names of the configured backends, in order.
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }
}

impl Default for FallbackTextExtractor {
    fn default() -> Self {
        Self::from_config(&PdfConfig::default())
    }
}

impl TextExtractor for FallbackTextExtractor {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn extract_text(&self, path: &Path) -> Result<String> {
        self.extract(path).map(|t| t.text)
    }

    fn extract(&self, path: &Path) -> Result<ExtractedText> {
        check_pdf_path(path)?;

        let mut best: Option<ExtractedText> = None;
        let mut first_error: Option<PdfError> = None;
        let mut any_empty = false;

        for backend in &self.backends {
            match backend.extract_text(path) {
                Ok(text) => {
                    let text = text.trim();
                    let len = text.chars().count();
                    debug!("Backend {} extracted {} characters", backend.name(), len);

                    if len >= self.min_text_length {
                        return Ok(ExtractedText {
                            text: text.to_string(),
                            backend: backend.name(),
                        });
                    }

                    if len == 0 {
                        any_empty = true;
                        continue;
                    }

                    let longer = best
                        .as_ref()
                        .is_none_or(|b| b.text.chars().count() < len);
                    if longer {
                        best = Some(ExtractedText {
                            text: text.to_string(),
                            backend: backend.name(),
                        });
                    }
                }
                Err(e) => {
                    warn!("Backend {} failed: {}", backend.name(), e);
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(best) = best {
            debug!("Accepting short text from {}", best.backend);
            return Ok(best);
        }

        match first_error {
            Some(e) if !any_empty => Err(e),
            _ => Err(PdfError::NoText),
        }
    }
}
