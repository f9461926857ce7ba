//! Config command - inspect, create and validate the configuration file.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use cardstmt_core::statement::{BankDefinition, DateOrder, PatternDefinitions};
use cardstmt_core::{CardStmtConfig, PatternRegistry};

use super::{default_config_path, load_config};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init(InitArgs),

    /// Print one value, e.g. "pdf.backends" or "banks.0.key"
    Get { key: String },

    /// Validate the configured bank profiles
    Check,

    /// Print where the configuration file is read from
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Where to write the file (defaults to the user config directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace an existing file
    #[arg(long)]
    force: bool,

    /// Include a sample bank profile to copy from
    #[arg(long)]
    with_sample_bank: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(config_path),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Get { key } => get_config(&key, config_path),
        ConfigCommand::Check => check_config(config_path),
        ConfigCommand::Path => show_path(config_path),
    }
}

fn show_config(config_path: Option<&str>) -> anyhow::Result<()> {
    if config_path.is_none() && !default_config_path().exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let config = load_config(config_path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    if !config.banks.is_empty() {
        let keys: Vec<&str> = config.banks.iter().map(|b| b.key.as_str()).collect();
        eprintln!(
            "{} Extra banks after the built-ins: {}",
            style("ℹ").blue(),
            keys.join(", ")
        );
    }

    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut config = CardStmtConfig::default();
    if args.with_sample_bank {
        config.banks.push(sample_bank());
    }
    config.save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

/// A complete profile for a bank that is not built in.
fn sample_bank() -> BankDefinition {
    BankDefinition {
        key: "YES".to_string(),
        signatures: vec!["yes bank".to_string(), "yesbank".to_string()],
        date_order: DateOrder::DayMonthYear,
        patterns: PatternDefinitions {
            account_pattern: Some(r"Card No\.?.*?([*X]{2,}[ -]?\d{4})".to_string()),
            balance_pattern: Some(r"Total Amount Due.*?(\d[\d,]*(?:\.\d+)?)".to_string()),
            due_date_pattern: Some(r"Payment Due Date.*?(\d{2}/\d{2}/\d{4})".to_string()),
            credit_limit_pattern: Some(r"Credit Limit.*?(\d[\d,]*(?:\.\d+)?)".to_string()),
            statement_period_pattern: Some(
                r"Statement Period.*?(\d{2}/\d{2}/\d{4})\s*to\s*(\d{2}/\d{2}/\d{4})".to_string(),
            ),
        },
    }
}

fn get_config(key: &str, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let json = serde_json::to_value(&config)?;

    let mut current = &json;
    for part in key.split('.') {
        let next = match (current, part.parse::<usize>()) {
            (Value::Array(items), Ok(index)) => items.get(index),
            _ => current.get(part),
        };
        current = next.ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }

    println!("{}", serde_json::to_string_pretty(current)?);

    Ok(())
}

fn check_config(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut builder = PatternRegistry::builder().with_builtin_banks();
    let mut rejected = 0;

    for def in &config.banks {
        match builder.register(def) {
            Ok(_) => println!("{} {}", style("✓").green(), def.key),
            Err(e) => {
                rejected += 1;
                println!("{} {}: {}", style("✗").red(), def.key, e);
            }
        }
    }

    let registry = builder.build();
    println!(
        "{} banks available: {}",
        registry.len(),
        registry.keys().join(", ")
    );

    if rejected > 0 {
        anyhow::bail!("{} bank profile(s) rejected", rejected);
    }

    Ok(())
}

fn show_path(config_path: Option<&str>) -> anyhow::Result<()> {
    let (path, source) = match config_path {
        Some(path) => (PathBuf::from(path), "--config"),
        None => (default_config_path(), "default location"),
    };

    println!("Configuration file: {} ({})", path.display(), source);

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'cardstmt config init' to create a configuration file.");
    }

    Ok(())
}
