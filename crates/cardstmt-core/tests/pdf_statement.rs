//! Statement PDFs built in memory and run through the full pipeline.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use tempfile::TempDir;

use cardstmt_core::pdf::LopdfBackend;
use cardstmt_core::{
    ExtractionMethod, FallbackTextExtractor, StatementParser, StatementRecord,
};

const HDFC_LINES: &[&str] = &[
    "HDFC Bank Credit Card Statement",
    "Card Number: 4375 XXXX XXXX 1234",
    "Statement Period: 01-Sep-2024 to 30-Sep-2024",
    "Total Amount Due: Rs. 45,230.50",
    "Payment Due Date: 25/10/2024",
    "Credit Limit: Rs. 2,00,000",
];

fn write_pdf(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), 11.into()]));
        operations.push(Operation::new("Td", vec![72.into(), (760 - 20 * i as i64).into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("ET", vec![]));
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    doc.save_to(&mut file).unwrap();
    path
}

#[test]
fn pdf_statement_parses_through_fallback() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(dir.path(), "hdfc.pdf", HDFC_LINES);

    let parser = StatementParser::default();
    let record = parser.parse_pdf(&path, &FallbackTextExtractor::default());

    let parsed = match record {
        StatementRecord::Parsed(parsed) => parsed,
        StatementRecord::Failed(failed) => panic!("unexpected failure: {}", failed.error),
    };
    assert_eq!(parsed.bank, "HDFC");
    assert_eq!(parsed.account_number.as_deref(), Some("****1234"));
    assert_eq!(parsed.total_balance, Some(Decimal::from_str("45230.50").unwrap()));
    assert_eq!(parsed.payment_due_date, NaiveDate::from_ymd_opt(2024, 10, 25));
    assert_eq!(parsed.credit_limit, Some(Decimal::from(200_000)));
    assert_eq!(parsed.confidence_score, 100);

    let metadata = &parsed.metadata;
    assert_eq!(metadata.extraction_method, ExtractionMethod::Pdf);
    assert_eq!(metadata.source_file.as_deref(), Some("hdfc.pdf"));
    assert_eq!(metadata.text_backend.as_deref(), Some("pdf_extract"));
    assert!(metadata.file_size.unwrap_or(0) > 0);
}

#[test]
fn pdf_statement_parses_with_lopdf_alone() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(dir.path(), "hdfc.pdf", HDFC_LINES);

    let parser = StatementParser::default();
    let record = parser.parse_pdf(&path, &LopdfBackend::new());

    let parsed = record.parsed().expect("statement should parse");
    assert_eq!(parsed.bank, "HDFC");
    assert_eq!(parsed.account_number.as_deref(), Some("****1234"));
    assert!(parsed.missing_fields.is_empty(), "{:?}", parsed.missing_fields);
}

#[test]
fn pdf_without_bank_name_is_unknown_bank() {
    let dir = TempDir::new().unwrap();
    let path = write_pdf(dir.path(), "other.pdf", &["Some Other Bank", "Card Number: ****9999"]);

    let parser = StatementParser::default();
    let record = parser.parse_pdf(&path, &FallbackTextExtractor::default());

    assert_eq!(record.error(), Some("Bank not detected"));
    let failed = match record {
        StatementRecord::Failed(failed) => failed,
        StatementRecord::Parsed(_) => unreachable!(),
    };
    assert_eq!(failed.source_file.as_deref(), Some("other.pdf"));
    assert!(failed.text_preview.unwrap_or_default().contains("Some Other Bank"));
    assert_eq!(failed.supported_banks, ["HDFC", "ICICI", "SBI", "AXIS", "KOTAK"]);
}
