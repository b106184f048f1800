// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod launcher;
pub mod logging;
pub mod supervisor;

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::{CliArgs, CliCommand, MirrorArgs};
use crate::config::{ConfigFile, default_config_path, load_or_default};
use crate::launcher::{MirrorOptions, detect_exec_prefix, list_devices};
use crate::supervisor::{ABNORMAL_EXIT, ChannelSink, CommandSpec, Supervisor, SupervisorEvent};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - executable-prefix detection
/// - command construction per subcommand
/// - the supervisor, with Ctrl-C requesting termination
///
/// Returns the exit code the CLI should report: the supervised command's
/// exit code for `mirror`/`exec`, zero for `devices`.
pub async fn run(args: CliArgs) -> Result<i32> {
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let cfg = load_or_default(&config_path)?;

    let base = base_spec(&cfg).await;

    match args.command {
        CliCommand::Mirror(overrides) => {
            let options = merge_mirror_options(cfg.mirror.clone(), overrides);
            let command = options.to_command();
            info!(%command, "starting mirroring session");
            supervise(base.command(command)).await
        }
        CliCommand::Devices => {
            let devices = list_devices(&base).await?;
            if devices.is_empty() {
                println!("no devices detected");
            } else {
                for device in &devices {
                    println!("{}\t{}", device.serial, device.state);
                }
            }
            Ok(0)
        }
        CliCommand::Exec { command } => supervise(base.command(command.join(" "))).await,
    }
}

/// Build the shared spec context (tool directory + executable prefix) from
/// config, probing the prefix when it is not pinned.
async fn base_spec(cfg: &ConfigFile) -> CommandSpec {
    let prefix = match &cfg.tools.exec_prefix {
        Some(prefix) => prefix.clone(),
        None => detect_exec_prefix().await,
    };
    debug!(%prefix, "resolved executable prefix");

    let mut spec = CommandSpec::default().exec_prefix(prefix);
    if let Some(dir) = &cfg.tools.dir {
        spec = spec.tool_dir(dir);
    }
    spec
}

/// Run one supervised command, relaying its output to the console.
///
/// Ctrl-C requests termination; completion still arrives through the event
/// channel and its code becomes the return value.
async fn supervise(spec: CommandSpec) -> Result<i32> {
    let (sink, mut events) = ChannelSink::new();
    let supervisor = Arc::new(Supervisor::spawn(&spec, sink)?);

    {
        let supervisor = Arc::clone(&supervisor);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received; terminating supervised process");
                supervisor.terminate();
            }
        });
    }

    loop {
        match events.recv().await {
            Some(SupervisorEvent::Output { line, is_error }) => {
                if is_error {
                    eprintln!("{line}");
                } else {
                    println!("{line}");
                }
            }
            Some(SupervisorEvent::Completed { code }) => {
                info!(exit_code = code, "supervised command finished");
                return Ok(code);
            }
            None => return Ok(ABNORMAL_EXIT),
        }
    }
}

/// Apply CLI flag overrides on top of the configured mirror options.
fn merge_mirror_options(mut base: MirrorOptions, overrides: MirrorArgs) -> MirrorOptions {
    if overrides.bit_rate.is_some() {
        base.video_bit_rate = overrides.bit_rate;
    }
    if overrides.max_fps.is_some() {
        base.max_fps = overrides.max_fps;
    }
    if overrides.window_title.is_some() {
        base.window_title = overrides.window_title;
    }
    if overrides.max_size.is_some() {
        base.max_size = overrides.max_size;
    }
    if overrides.print_fps {
        base.print_fps = true;
    }
    if overrides.serial.is_some() {
        base.serial = overrides.serial;
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_config_defaults() {
        let base = MirrorOptions {
            video_bit_rate: Some("8M".to_string()),
            max_fps: Some(90),
            ..Default::default()
        };
        let overrides = MirrorArgs {
            bit_rate: Some("16M".to_string()),
            serial: Some("abc123".to_string()),
            ..Default::default()
        };

        let merged = merge_mirror_options(base, overrides);
        assert_eq!(merged.video_bit_rate.as_deref(), Some("16M"));
        assert_eq!(merged.max_fps, Some(90));
        assert_eq!(merged.serial.as_deref(), Some("abc123"));
    }
}
