// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::Result;

/// Load a configuration file from a given path.
///
/// Performs TOML deserialization with unknown-key rejection; defaults are
/// applied by `serde` + the model's `Default` impls.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: ConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load the configuration, falling back to defaults when the file does not
/// exist. A present-but-malformed file is still an error.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(ConfigFile::default());
    }
    load_from_path(path)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `Mirrorctl.toml` in the current working
/// directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Mirrorctl.toml")
}
