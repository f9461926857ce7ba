//! Statement parser running the full extraction pipeline.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{CardStmtError, Result};
use crate::models::config::{CardStmtConfig, ExtractionConfig};
use crate::models::statement::*;
use crate::pdf::TextExtractor;

use super::fields::extract_fields;
use super::identify::identify_bank;
use super::normalize::normalize;
use super::registry::PatternRegistry;
use super::score::assess;

/// Turns statement text into a [`StatementRecord`].
///
/// Holds an immutable registry and is `Send + Sync`, so one parser can serve
/// many threads.
#[derive(Debug, Clone, Default)]
pub struct StatementParser {
    registry: PatternRegistry,
    config: ExtractionConfig,
}

impl StatementParser {
    /// Create a parser over an explicit registry.
    pub fn new(registry: PatternRegistry) -> Self {
        Self {
            registry,
            config: ExtractionConfig::default(),
        }
    }

    /// Built-in banks plus any configured extras.
    pub fn from_config(config: &CardStmtConfig) -> Self {
        Self {
            registry: PatternRegistry::with_extra_banks(&config.banks),
            config: config.extraction.clone(),
        }
    }

    /// Set extraction options.
    pub fn with_extraction_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Run identification, extraction, normalization and scoring over
    /// already-extracted text.
    pub fn parse_text(&self, text: &str) -> StatementRecord {
        let start = Instant::now();

        match self.extract_statement(text) {
            Ok(mut statement) => {
                statement.metadata.processing_time_ms = Some(start.elapsed().as_millis() as u64);
                StatementRecord::Parsed(statement)
            }
            Err(e) => StatementRecord::Failed(self.failure(&e, Some(text))),
        }
    }

    /// Extract text from a PDF with `extractor` and parse it.
    ///
    /// Text extraction failures become error records without attempting
    /// identification.
    pub fn parse_pdf(&self, path: &Path, extractor: &dyn TextExtractor) -> StatementRecord {
        let start = Instant::now();
        let source_file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());

        info!("Processing statement {}", path.display());

        let extracted = match extractor.extract(path) {
            Ok(extracted) => extracted,
            Err(e) => {
                warn!("Text extraction failed for {}: {}", path.display(), e);
                let mut failed = self.failure(&CardStmtError::from(e), None);
                failed.source_file = source_file;
                return StatementRecord::Failed(failed);
            }
        };

        match self.extract_statement(&extracted.text) {
            Ok(mut statement) => {
                let metadata = &mut statement.metadata;
                metadata.extraction_method = ExtractionMethod::Pdf;
                metadata.source_file = source_file;
                metadata.file_size = std::fs::metadata(path).ok().map(|m| m.len());
                metadata.text_backend = Some(extracted.backend.to_string());
                metadata.processing_time_ms = Some(start.elapsed().as_millis() as u64);
                StatementRecord::Parsed(statement)
            }
            Err(e) => {
                let mut failed = self.failure(&e, Some(&extracted.text));
                failed.source_file = source_file;
                StatementRecord::Failed(failed)
            }
        }
    }

    fn extract_statement(&self, text: &str) -> Result<ParsedStatement> {
        debug!("Parsing statement from {} characters of text", text.len());

        let profile = identify_bank(text, &self.registry).ok_or(CardStmtError::UnknownBank)?;

        let raw = extract_fields(text, profile);
        let fields = normalize(&raw, profile.date_order());
        let assessment = assess(&fields);
        let warnings = fields.warnings();

        info!(
            "Extracted {} statement with confidence {}%",
            profile.key(),
            assessment.confidence_score
        );
        if !assessment.missing_fields.is_empty() {
            debug!("Missing fields: {:?}", assessment.missing_fields);
        }

        Ok(ParsedStatement {
            bank: profile.key().to_string(),
            account_number: fields.account_number,
            statement_period: fields.statement_period,
            total_balance: fields.total_balance,
            payment_due_date: fields.payment_due_date,
            credit_limit: fields.credit_limit,
            confidence_score: assessment.confidence_score,
            missing_fields: assessment.missing_fields,
            warnings,
            metadata: ExtractionMetadata {
                extraction_method: ExtractionMethod::Text,
                text_length: text.chars().count(),
                parsed_at: Some(Utc::now()),
                ..Default::default()
            },
        })
    }

    fn failure(&self, error: &CardStmtError, text: Option<&str>) -> FailedStatement {
        let mut failed = FailedStatement::new(error.to_string());

        if matches!(error, CardStmtError::UnknownBank) {
            failed.supported_banks = self
                .registry
                .keys()
                .into_iter()
                .map(String::from)
                .collect();

            if self.config.include_text_preview {
                failed.text_preview = text.map(|t| preview(t, self.config.preview_chars));
            }
        }

        failed
    }
}

/// Leading `chars` characters of the text, with `...` appended when cut.
fn preview(text: &str, chars: usize) -> String {
    let mut out: String = text.chars().take(chars).collect();
    if text.chars().count() > chars {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::pdf;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    struct StubExtractor(std::result::Result<&'static str, fn() -> PdfError>);

    impl TextExtractor for StubExtractor {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn extract_text(&self, _path: &Path) -> pdf::Result<String> {
            match &self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(make) => Err(make()),
            }
        }
    }

    const SCENARIO: &str = "HDFC Bank Statement\nCard ending ****5678\nBalance Due: 12,345.00\n\
        Due Date: 15/08/2025\nCredit Limit: 100,000";

    #[test]
    fn test_parse_text_scenario() {
        let parser = StatementParser::default();
        let record = parser.parse_text(SCENARIO);
        let parsed = record.parsed().expect("parsed record");

        assert_eq!(parsed.bank, "HDFC");
        assert_eq!(parsed.account_number.as_deref(), Some("****5678"));
        assert_eq!(parsed.total_balance, Some(Decimal::from_str("12345.00").unwrap()));
        assert_eq!(parsed.payment_due_date, NaiveDate::from_ymd_opt(2025, 8, 15));
        assert_eq!(parsed.credit_limit, Some(Decimal::from(100_000)));
        assert_eq!(parsed.confidence_score, 80);
        assert_eq!(parsed.missing_fields, vec![Field::StatementPeriod]);
        assert_eq!(parsed.metadata.extraction_method, ExtractionMethod::Text);
    }

    #[test]
    fn test_unknown_bank_record() {
        let parser = StatementParser::default();
        let record = parser.parse_text("Card ending ****5678 Balance Due: 12,345.00");

        let StatementRecord::Failed(failed) = record else {
            panic!("expected failure");
        };
        assert_eq!(failed.error, "Bank not detected");
        assert_eq!(failed.supported_banks, ["HDFC", "ICICI", "SBI", "AXIS", "KOTAK"]);
        assert_eq!(
            failed.text_preview.as_deref(),
            Some("Card ending ****5678 Balance Due: 12,345.00")
        );
    }

    #[test]
    fn test_preview_truncated_and_optional() {
        let text = "x".repeat(20);
        let parser = StatementParser::default().with_extraction_config(ExtractionConfig {
            include_text_preview: true,
            preview_chars: 5,
        });
        let record = parser.parse_text(&text);
        let StatementRecord::Failed(failed) = record else {
            panic!("expected failure");
        };
        assert_eq!(failed.text_preview.as_deref(), Some("xxxxx..."));

        let parser = parser.with_extraction_config(ExtractionConfig {
            include_text_preview: false,
            preview_chars: 5,
        });
        let StatementRecord::Failed(failed) = parser.parse_text(&text) else {
            panic!("expected failure");
        };
        assert!(failed.text_preview.is_none());
    }

    #[test]
    fn test_parse_pdf_extraction_failure() {
        let parser = StatementParser::default();
        let extractor = StubExtractor(Err(|| PdfError::Encrypted));
        let record = parser.parse_pdf(Path::new("locked.pdf"), &extractor);

        let StatementRecord::Failed(failed) = record else {
            panic!("expected failure");
        };
        assert_eq!(failed.error, "PDF is encrypted");
        assert!(failed.supported_banks.is_empty());
        assert_eq!(failed.source_file.as_deref(), Some("locked.pdf"));
    }

    #[test]
    fn test_parse_pdf_metadata() {
        let parser = StatementParser::default();
        let extractor = StubExtractor(Ok(SCENARIO));
        let record = parser.parse_pdf(Path::new("/tmp/statement.pdf"), &extractor);
        let parsed = record.parsed().expect("parsed record");

        assert_eq!(parsed.metadata.extraction_method, ExtractionMethod::Pdf);
        assert_eq!(parsed.metadata.source_file.as_deref(), Some("statement.pdf"));
        assert_eq!(parsed.metadata.text_backend.as_deref(), Some("stub"));
        assert_eq!(parsed.metadata.text_length, SCENARIO.chars().count());
        assert!(parsed.metadata.parsed_at.is_some());
    }

    #[test]
    fn test_zero_score_is_still_parsed() {
        let parser = StatementParser::default();
        let record = parser.parse_text("Welcome to ICICI Bank");
        let parsed = record.parsed().expect("parsed record");

        assert_eq!(parsed.confidence_score, 0);
        assert_eq!(parsed.missing_fields.len(), 5);
    }
}
