// src/config/model.rs

//! Typed model of `Mirrorctl.toml`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::launcher::MirrorOptions;

/// Root of the optional configuration file.
///
/// Every table and field has a default, so an absent or empty file is a
/// valid configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Defaults for the `mirror` subcommand.
    pub mirror: MirrorOptions,
    pub tools: ToolsConfig,
}

/// Where the external tools live and how they are invoked.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Directory holding a bundled scrcpy/adb distribution. Recognized
    /// tool commands run from inside it when it exists.
    pub dir: Option<PathBuf>,
    /// Override for the executable prefix; probed at startup when unset.
    pub exec_prefix: Option<String>,
}
