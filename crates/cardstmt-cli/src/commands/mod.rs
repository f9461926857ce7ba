//! CLI subcommands.

pub mod banks;
pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use cardstmt_core::CardStmtConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardstmt")
        .join("config.json")
}

/// Load the configuration named by `-c`, else the default file if present,
/// else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CardStmtConfig> {
    if let Some(path) = config_path {
        debug!("Loading configuration from {}", path);
        return Ok(CardStmtConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        return Ok(CardStmtConfig::from_file(&default_path)?);
    }

    Ok(CardStmtConfig::default())
}
