// src/launcher/prefix.rs

//! Executable-prefix detection.
//!
//! When the tools ship next to the program instead of living on PATH, their
//! commands need a `./` (or `.\` on Windows) prefix. Probing `adb --version`
//! tells us which form actually runs in this environment.

use std::process::Stdio;

use tracing::debug;

use crate::supervisor::runner::shell_command;

/// Platform default used when probing is inconclusive.
pub fn platform_prefix() -> &'static str {
    if cfg!(windows) { ".\\" } else { "./" }
}

/// Detect the prefix needed to invoke the tools.
///
/// Tries `adb --version` bare first (tools on PATH mean no prefix), then
/// with the platform prefix. Falls back to the platform default when
/// neither probe succeeds. Probe output is discarded.
pub async fn detect_exec_prefix() -> String {
    if probe("adb --version").await {
        return String::new();
    }

    let prefixed = format!("{}adb --version", platform_prefix());
    if probe(&prefixed).await {
        return platform_prefix().to_string();
    }

    debug!("prefix probes failed; assuming platform default");
    platform_prefix().to_string()
}

async fn probe(command: &str) -> bool {
    let mut cmd = shell_command(command);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    matches!(cmd.status().await, Ok(status) if status.success())
}
