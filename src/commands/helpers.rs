//! Command helper utilities

use std::path::{Path, PathBuf};

use crate::config::{CONFIG_FILE_NAME, ConfigOverrides, PackagerConfig};
use crate::error::Result;
use crate::error::archive::io_error;

/// Resolve project path from optional argument
///
/// If a project path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_project_dir(project_dir: Option<PathBuf>) -> Result<PathBuf> {
    match project_dir {
        Some(path) => Ok(path),
        None => std::env::current_dir()
            .map_err(|e| io_error(format!("Failed to get current directory: {e}"))),
    }
}

/// Load `plugpack.yaml` (or `config`, relative to the project), apply overrides and validate
pub fn load_config(
    project_dir: &Path,
    config: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<PackagerConfig> {
    let path = match config {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => project_dir.join(path),
        None => project_dir.join(CONFIG_FILE_NAME),
    };
    let mut config = PackagerConfig::load(&path)?;
    config.apply(overrides);
    config.validate()?;
    Ok(config)
}
