// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorctlError {
    /// The command string was empty after trimming. Raised by
    /// [`crate::supervisor::CommandSpec::resolve`] before anything is
    /// spawned.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A supervised tool invocation that the launcher depends on (e.g.
    /// `adb devices`) exited with a non-zero code.
    #[error("`{command}` exited with code {code}")]
    ToolFailed { command: String, code: i32 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MirrorctlError>;
