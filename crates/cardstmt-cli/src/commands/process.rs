//! Process command - extract fields from a single statement.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardstmt_core::statement::rules::format_inr_amount;
use cardstmt_core::{
    CardStmtConfig, FallbackTextExtractor, StatementParser, StatementRecord,
};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input statement (PDF, or extracted text as .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction confidence and missing fields
    #[arg(long)]
    show_confidence: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;
    let parser = StatementParser::from_config(&config);

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Extracting statement fields...");

    let record = parse_file(&args.input, &parser, &config)?;

    pb.finish_and_clear();

    let output = format_record(&record, args.format, args.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    if args.show_confidence {
        if let Some(parsed) = record.parsed() {
            println!();
            println!(
                "{} Extraction confidence: {}%",
                style("ℹ").blue(),
                parsed.confidence_score
            );
            if !parsed.missing_fields.is_empty() {
                let missing: Vec<&str> = parsed.missing_fields.iter().map(|f| f.as_str()).collect();
                println!("{} Missing fields: {}", style("ℹ").blue(), missing.join(", "));
            }
            for warning in &parsed.warnings {
                println!("{} {}", style("⚠").yellow(), warning);
            }
            if let Some(time_ms) = parsed.metadata.processing_time_ms {
                println!("{} Processing time: {}ms", style("ℹ").blue(), time_ms);
            }
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if let Some(error) = record.error() {
        anyhow::bail!("{}", error);
    }

    Ok(())
}

/// Parse one file. Text files skip PDF extraction.
pub fn parse_file(
    path: &Path,
    parser: &StatementParser,
    config: &CardStmtConfig,
) -> anyhow::Result<StatementRecord> {
    let is_text = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));

    if !is_text {
        let extractor = FallbackTextExtractor::from_config(&config.pdf);
        return Ok(parser.parse_pdf(path, &extractor));
    }

    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let text = fs::read_to_string(path)?;
    let mut record = parser.parse_text(&text);
    let source_file = path.file_name().map(|n| n.to_string_lossy().into_owned());
    match &mut record {
        StatementRecord::Parsed(parsed) => parsed.metadata.source_file = source_file,
        StatementRecord::Failed(failed) => failed.source_file = source_file,
    }

    Ok(record)
}

pub fn format_record(
    record: &StatementRecord,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(std::slice::from_ref(record)),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

/// Header of the CSV rendering, shared with the batch summary.
pub const CSV_HEADER: [&str; 10] = [
    "bank",
    "account_number",
    "statement_start",
    "statement_end",
    "total_balance",
    "payment_due_date",
    "credit_limit",
    "confidence_score",
    "missing_fields",
    "error",
];

/// One CSV row for a record, in [`CSV_HEADER`] order.
pub fn csv_row(record: &StatementRecord) -> Vec<String> {
    match record {
        StatementRecord::Parsed(p) => {
            let missing: Vec<&str> = p.missing_fields.iter().map(|f| f.as_str()).collect();
            vec![
                p.bank.clone(),
                p.account_number.clone().unwrap_or_default(),
                p.statement_period.map(|s| s.start.to_string()).unwrap_or_default(),
                p.statement_period.map(|s| s.end.to_string()).unwrap_or_default(),
                p.total_balance.map(|d| d.to_string()).unwrap_or_default(),
                p.payment_due_date.map(|d| d.to_string()).unwrap_or_default(),
                p.credit_limit.map(|d| d.to_string()).unwrap_or_default(),
                p.confidence_score.to_string(),
                missing.join(";"),
                String::new(),
            ]
        }
        StatementRecord::Failed(f) => {
            let mut row = vec![String::new(); CSV_HEADER.len() - 1];
            row.push(f.error.clone());
            row
        }
    }
}

fn format_csv(records: &[StatementRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.write_record(csv_row(record))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &StatementRecord) -> String {
    let parsed = match record {
        StatementRecord::Parsed(parsed) => parsed,
        StatementRecord::Failed(failed) => {
            let mut output = format!("Error: {}\n", failed.error);
            if !failed.supported_banks.is_empty() {
                output.push_str(&format!(
                    "Supported banks: {}\n",
                    failed.supported_banks.join(", ")
                ));
            }
            return output;
        }
    };

    let not_found = || "not found".to_string();
    let mut output = String::new();

    output.push_str(&format!("Bank: {}\n", parsed.bank));
    output.push_str(&format!(
        "Account number: {}\n",
        parsed.account_number.clone().unwrap_or_else(not_found)
    ));
    output.push_str(&format!(
        "Statement period: {}\n",
        parsed
            .statement_period
            .map(|p| format!("{} to {}", p.start, p.end))
            .unwrap_or_else(not_found)
    ));
    output.push_str(&format!(
        "Total balance: {}\n",
        parsed.total_balance.map(format_inr_amount).unwrap_or_else(not_found)
    ));
    output.push_str(&format!(
        "Payment due date: {}\n",
        parsed
            .payment_due_date
            .map(|d| d.to_string())
            .unwrap_or_else(not_found)
    ));
    output.push_str(&format!(
        "Credit limit: {}\n",
        parsed.credit_limit.map(format_inr_amount).unwrap_or_else(not_found)
    ));
    output.push_str(&format!("Confidence: {}%\n", parsed.confidence_score));

    output
}
