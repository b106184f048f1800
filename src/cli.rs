// src/cli.rs

//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Configure and launch scrcpy/adb, relaying their output.
#[derive(Debug, Parser)]
#[command(name = "mirrorctl", version, about)]
pub struct CliArgs {
    /// Path to the configuration file (default: Mirrorctl.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log verbosity (overrides MIRRORCTL_LOG).
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Start a mirroring session with the configured options.
    Mirror(MirrorArgs),
    /// List devices known to the debug bridge.
    Devices,
    /// Run an arbitrary command under supervision.
    Exec {
        /// Command line to execute, shell-interpreted.
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },
}

/// Flag overrides applied on top of the `[mirror]` config table.
#[derive(Debug, Default, clap::Args)]
pub struct MirrorArgs {
    /// Video bit rate, e.g. 8M.
    #[arg(long)]
    pub bit_rate: Option<String>,
    /// Frame-rate cap.
    #[arg(long)]
    pub max_fps: Option<u32>,
    /// Mirror window title.
    #[arg(long)]
    pub window_title: Option<String>,
    /// Longest-side resolution cap in pixels.
    #[arg(long)]
    pub max_size: Option<u32>,
    /// Show the FPS counter.
    #[arg(long)]
    pub print_fps: bool,
    /// Device serial to mirror; defaults to the single USB device.
    #[arg(long)]
    pub serial: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
