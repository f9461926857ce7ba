//! Banks command - list registered bank profiles.

use clap::Args;
use console::style;

use cardstmt_core::StatementParser;

/// Arguments for the banks command.
#[derive(Args)]
pub struct BanksArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: BanksArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let parser = StatementParser::from_config(&config);
    let registry = parser.registry();

    if args.json {
        let banks: Vec<serde_json::Value> = registry
            .profiles()
            .iter()
            .map(|p| {
                serde_json::json!({
                    "key": p.key(),
                    "signatures": p.signatures(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&banks)?);
        return Ok(());
    }

    println!("{}", style("Supported banks (in identification order):").bold());
    for profile in registry.profiles() {
        println!(
            "  {:<8} {}",
            style(profile.key()).green(),
            profile.signatures().join(", ")
        );
    }

    Ok(())
}
