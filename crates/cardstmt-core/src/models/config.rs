//! Configuration structures for the statement pipeline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CardStmtError, Result};
use crate::pdf::TextBackendKind;
use crate::statement::BankDefinition;

/// Main configuration for the cardstmt pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStmtConfig {
    /// PDF text extraction configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Additional bank profiles, registered after the built-in ones.
    pub banks: Vec<BankDefinition>,
}

/// PDF text extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Text backends, tried in order.
    pub backends: Vec<TextBackendKind>,

    /// Minimum trimmed text length accepted before trying the next backend.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            backends: vec![TextBackendKind::PdfExtract, TextBackendKind::Lopdf],
            min_text_length: 100,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Attach a text preview to "Bank not detected" records.
    pub include_text_preview: bool,

    /// Number of characters in the text preview.
    pub preview_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            include_text_preview: true,
            preview_chars: 500,
        }
    }
}

impl CardStmtConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CardStmtError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CardStmtError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CardStmtConfig::default();
        assert_eq!(config.pdf.min_text_length, 100);
        assert_eq!(
            config.pdf.backends,
            vec![TextBackendKind::PdfExtract, TextBackendKind::Lopdf]
        );
        assert_eq!(config.extraction.preview_chars, 500);
        assert!(config.banks.is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: CardStmtConfig =
            serde_json::from_str(r#"{ "pdf": { "backends": ["lopdf"] } }"#).unwrap();
        assert_eq!(config.pdf.backends, vec![TextBackendKind::Lopdf]);
        assert_eq!(config.pdf.min_text_length, 100);
        assert!(config.extraction.include_text_preview);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CardStmtConfig::default();
        config.extraction.preview_chars = 120;
        config.save(&path).unwrap();

        let loaded = CardStmtConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.preview_chars, 120);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CardStmtConfig::from_file(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(CardStmtError::Io(_))));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ \"pdf\": ").unwrap();

        match CardStmtConfig::from_file(&path) {
            Err(CardStmtError::Config(msg)) => assert!(msg.contains("config.json"), "{}", msg),
            other => panic!("expected a config error, got {:?}", other),
        }
    }
}
