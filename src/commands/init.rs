use crate::config::{DebtpilotConfig, CONFIG_FILE_NAME};
use crate::io;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const HEADER: &str = "# debtpilot configuration\n\
# Weights must sum to 1.0; thresholds are validated at startup.\n\n";

/// Default configuration rendered as TOML
pub fn default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&DebtpilotConfig::default())
        .context("Failed to render default configuration")?;
    Ok(format!("{}{}", HEADER, body))
}

/// Write a default `.debtpilot.toml` into `dir`
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_bytes_atomically(&config_path, default_config_toml()?.as_bytes())?;
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}
