// src/supervisor/spec.rs

//! Command specification and platform command resolution.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{MirrorctlError, Result};

/// Commands starting with one of the tools this crate controls get the
/// executable-prefix / tool-directory treatment; everything else runs
/// verbatim.
static RECOGNIZED_TOOLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(adb|scrcpy)\b").expect("tool pattern is valid"));

/// Everything needed to launch one supervised command.
///
/// Immutable once handed to [`Supervisor`](super::Supervisor): the
/// supervisor consumes the resolved form and never re-reads the spec.
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    command: String,
    working_dir: Option<PathBuf>,
    exec_prefix: Option<String>,
    tool_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    /// Replace the command string, keeping prefix/directory context.
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Directory the child process starts in. Defaults to the caller's
    /// current directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Prefix prepended to recognized tool commands when the binaries live
    /// next to the program rather than on PATH (`./`, or `.\` on Windows).
    pub fn exec_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.exec_prefix = Some(prefix.into());
        self
    }

    /// Directory holding a bundled copy of the tools. When it exists on
    /// disk, recognized tool commands run from inside it.
    pub fn tool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tool_dir = Some(dir.into());
        self
    }

    /// Resolve the final shell line.
    ///
    /// A trimmed-empty command fails with
    /// [`MirrorctlError::InvalidCommand`] before anything is spawned.
    /// Recognized tool commands get the executable prefix and, when the
    /// tool directory exists, a directory-change hop; everything else
    /// passes through verbatim.
    pub fn resolve(&self) -> Result<ResolvedCommand> {
        let command = self.command.trim();
        if command.is_empty() {
            return Err(MirrorctlError::InvalidCommand(
                "command is empty".to_string(),
            ));
        }

        let shell_line = if RECOGNIZED_TOOLS.is_match(command) {
            let prefix = self.exec_prefix.as_deref().unwrap_or("");
            let prefixed = format!("{prefix}{command}");
            match &self.tool_dir {
                Some(dir) if dir.is_dir() => {
                    format!("cd \"{}\" && {prefixed}", dir.display())
                }
                _ => prefixed,
            }
        } else {
            command.to_string()
        };

        Ok(ResolvedCommand {
            shell_line,
            working_dir: self.working_dir.clone(),
        })
    }
}

/// Final shell-interpreted command line plus working directory.
#[derive(Debug, Clone)]
pub struct ResolvedCommand {
    pub(crate) shell_line: String,
    pub(crate) working_dir: Option<PathBuf>,
}

impl ResolvedCommand {
    pub fn shell_line(&self) -> &str {
        &self.shell_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_command_is_rejected() {
        let err = CommandSpec::new("   ").resolve().unwrap_err();
        assert!(matches!(err, MirrorctlError::InvalidCommand(_)));
    }

    #[test]
    fn unrecognized_command_passes_through_verbatim() {
        let resolved = CommandSpec::new("ls -la")
            .exec_prefix("./")
            .resolve()
            .unwrap();
        assert_eq!(resolved.shell_line(), "ls -la");
    }

    #[test]
    fn recognized_tool_gets_prefix() {
        let resolved = CommandSpec::new("adb devices")
            .exec_prefix("./")
            .resolve()
            .unwrap();
        assert_eq!(resolved.shell_line(), "./adb devices");
    }

    #[test]
    fn tool_name_must_end_at_word_boundary() {
        let resolved = CommandSpec::new("adbx devices")
            .exec_prefix("./")
            .resolve()
            .unwrap();
        assert_eq!(resolved.shell_line(), "adbx devices");
    }

    #[test]
    fn existing_tool_dir_adds_directory_hop() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = CommandSpec::new("scrcpy --select-usb")
            .exec_prefix("./")
            .tool_dir(dir.path())
            .resolve()
            .unwrap();
        assert_eq!(
            resolved.shell_line(),
            format!("cd \"{}\" && ./scrcpy --select-usb", dir.path().display())
        );
    }

    #[test]
    fn missing_tool_dir_is_ignored() {
        let resolved = CommandSpec::new("scrcpy")
            .exec_prefix("./")
            .tool_dir("definitely/not/a/dir")
            .resolve()
            .unwrap();
        assert_eq!(resolved.shell_line(), "./scrcpy");
    }

    #[test]
    fn command_is_trimmed_before_matching() {
        let resolved = CommandSpec::new("  adb shell  ")
            .exec_prefix("./")
            .resolve()
            .unwrap();
        assert_eq!(resolved.shell_line(), "./adb shell");
    }

    #[test]
    fn no_prefix_configured_means_bare_tool() {
        let resolved = CommandSpec::new("adb devices").resolve().unwrap();
        assert_eq!(resolved.shell_line(), "adb devices");
    }
}
