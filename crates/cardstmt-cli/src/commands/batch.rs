//! Batch processing command for a folder of statements.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::{glob_with, MatchOptions};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, warn};

use cardstmt_core::{FallbackTextExtractor, StatementParser, StatementRecord};

use super::process::{csv_row, CSV_HEADER};

/// Name of the combined results file.
pub const RESULTS_FILE: &str = "parsing_results.json";

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory of statements, or a glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (default: the input directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,
}

/// Result of processing a single file.
#[derive(Serialize)]
struct BatchEntry {
    file: String,
    result: StatementRecord,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let input_path = Path::new(&args.input);
    let (pattern, default_output) = if input_path.is_dir() {
        (
            input_path.join("*.pdf").to_string_lossy().into_owned(),
            input_path.to_path_buf(),
        )
    } else {
        (args.input.clone(), PathBuf::from("."))
    };

    let options = MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };
    let mut files: Vec<PathBuf> = glob_with(&pattern, options)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No PDF files found for: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_dir = args.output_dir.clone().unwrap_or(default_output);
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = StatementParser::from_config(&config);
    let extractor = FallbackTextExtractor::from_config(&config.pdf);

    let mut entries = Vec::with_capacity(files.len());
    for path in &files {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let result = parser.parse_pdf(path, &extractor);
        if let Some(error) = result.error() {
            warn!("Failed to process {}: {}", path.display(), error);
        }

        entries.push(BatchEntry { file, result });
        pb.inc(1);
    }

    pb.finish_and_clear();

    let results_path = output_dir.join(RESULTS_FILE);
    fs::write(&results_path, serde_json::to_string_pretty(&entries)?)?;
    debug!("Wrote results to {}", results_path.display());
    println!(
        "{} Results written to {}",
        style("✓").green(),
        results_path.display()
    );

    if args.summary {
        let summary_path = output_dir.join("summary.csv");
        write_summary(&summary_path, &entries)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&BatchEntry> = entries.iter().filter(|e| e.result.is_error()).collect();
    let successful = entries.len() - failed.len();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        entries.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for entry in &failed {
            println!(
                "  - {}: {}",
                entry.file,
                entry.result.error().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &Path, entries: &[BatchEntry]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["file", "status"];
    header.extend(CSV_HEADER);
    wtr.write_record(&header)?;

    for entry in entries {
        let status = if entry.result.is_error() { "error" } else { "success" };
        let mut row = vec![entry.file.clone(), status.to_string()];
        row.extend(csv_row(&entry.result));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
