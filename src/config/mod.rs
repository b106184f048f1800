// src/config/mod.rs

//! Configuration loading for `Mirrorctl.toml`.

pub mod loader;
pub mod model;

pub use loader::{default_config_path, load_from_path, load_or_default};
pub use model::{ConfigFile, ToolsConfig};
