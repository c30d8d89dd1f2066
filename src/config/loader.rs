use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::DebtpilotConfig;
use crate::errors::{Error, Result};

/// Name of the project-level configuration file
pub const CONFIG_FILE_NAME: &str = ".debtpilot.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string.
///
/// Invalid weights or thresholds are fatal rather than silently replaced
/// with defaults.
pub fn parse_and_validate_config(contents: &str) -> Result<DebtpilotConfig> {
    let config = toml::from_str::<DebtpilotConfig>(contents)
        .map_err(|e| Error::configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from an explicit file. A missing file is an error.
pub fn load_config_from(path: &Path) -> Result<DebtpilotConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::configuration(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let config = parse_and_validate_config(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find `.debtpilot.toml` starting at `start` and walking up
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Resolve the effective configuration for a project.
///
/// An explicit path wins; otherwise the nearest `.debtpilot.toml` at or
/// above the project directory is used; otherwise defaults.
pub fn load_config(explicit: Option<&Path>, project: &Path) -> Result<DebtpilotConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let start = fs::canonicalize(project).unwrap_or_else(|_| project.to_path_buf());
    match find_config_file(&start) {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            let config = DebtpilotConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}
