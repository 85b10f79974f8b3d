//! Config and log file locations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use catalog_store::resolve_data_dir;

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Log file written while the TUI owns the terminal.
const BROWSE_LOG_FILE: &str = "catalog.log";

/// Resolves the config file path.
///
/// `{dir}/config.toml` when `dir` is given, else `~/.config/catalog/config.toml`.
///
/// # Errors
///
/// Returns an error if `HOME` is unset and `dir` is `None`.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    let base = match dir {
        Some(d) => d.clone(),
        None => {
            let home = std::env::var("HOME").context("HOME environment variable is not set")?;
            PathBuf::from(home).join(".config").join("catalog")
        }
    };
    Ok(base.join(CONFIG_FILE))
}

/// Resolves the browse log path next to `catalog.db`, creating the
/// data directory when missing.
///
/// # Errors
///
/// Returns an error if the data directory cannot be resolved or created.
pub fn resolve_log_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    let data_dir = resolve_data_dir(dir)?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create directory {}", data_dir.display()))?;
    Ok(data_dir.join(BROWSE_LOG_FILE))
}
