// src/supervisor/runner.rs

//! Read loop for one supervised process.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::event::{ABNORMAL_EXIT, EventSink};
use super::spec::ResolvedCommand;

/// How long a POSIX child gets to react to SIGTERM before the owned handle
/// is hard-killed.
pub const TERMINATION_GRACE: Duration = Duration::from_secs(5);

/// Run one command to completion, relaying its output to `sink`.
///
/// `completed` is emitted exactly once, strictly after the last output
/// line, no matter how the process ends: normal exit, spawn failure, or
/// forced termination via `cancel_rx`.
pub(crate) async fn run_command(
    resolved: ResolvedCommand,
    sink: Arc<dyn EventSink>,
    cancel_rx: oneshot::Receiver<()>,
) {
    info!(command = %resolved.shell_line(), "starting supervised process");

    let mut cmd = shell_command(resolved.shell_line());
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = &resolved.working_dir {
        cmd.current_dir(dir);
    }

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            sink.output(
                &format!("failed to start `{}`: {err}", resolved.shell_line()),
                true,
            );
            sink.completed(ABNORMAL_EXIT);
            return;
        }
    };

    let stdout_task = child
        .stdout
        .take()
        .map(|out| tokio::spawn(stream_lines(out, Arc::clone(&sink), false)));
    let stderr_task = child
        .stderr
        .take()
        .map(|err| tokio::spawn(stream_lines(err, Arc::clone(&sink), true)));

    let code = wait_or_terminate(&mut child, cancel_rx).await;

    // Both pipes must drain before completion is reported; the readers end
    // at EOF once the process is gone.
    if let Some(task) = stdout_task {
        let _ = task.await;
    }
    if let Some(task) = stderr_task {
        let _ = task.await;
    }

    info!(
        command = %resolved.shell_line(),
        exit_code = code,
        "supervised process finished"
    );
    sink.completed(code);
}

/// Build a shell command appropriate for the platform.
pub(crate) fn shell_command(line: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(line);
        c
    }
}

/// Relay complete lines from one pipe to the sink as they arrive.
async fn stream_lines<R>(pipe: R, sink: Arc<dyn EventSink>, is_error: bool)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut lines = BufReader::new(pipe).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => sink.output(&line, is_error),
            Ok(None) => break,
            Err(err) => {
                // Reported as an output line rather than raised; completion
                // detection continues on the runner task.
                sink.output(&format!("output stream error: {err}"), true);
                break;
            }
        }
    }
}

/// Wait for the child to exit, honouring a termination request.
async fn wait_or_terminate(child: &mut Child, mut cancel_rx: oneshot::Receiver<()>) -> i32 {
    tokio::select! {
        status = child.wait() => exit_code(status),
        cancel = &mut cancel_rx => match cancel {
            Ok(()) => terminate_child(child).await,
            // The handle was dropped without a terminate request; keep
            // waiting for the process on its own.
            Err(_) => exit_code(child.wait().await),
        },
    }
}

/// Forcibly stop the owned child. Best effort: every failure is logged and
/// swallowed.
///
/// Windows has no POSIX signal semantics, and killing only the direct child
/// would leave its spawned sub-processes (e.g. a mirroring session's
/// encoder) running, so the whole tree rooted at the child is killed. On
/// POSIX the child gets SIGTERM and [`TERMINATION_GRACE`] to exit before
/// the owned handle is hard-killed. Only the tracked process is ever
/// signalled; nothing is matched by executable name.
async fn terminate_child(child: &mut Child) -> i32 {
    let Some(pid) = child.id() else {
        // Already reaped.
        return exit_code(child.wait().await);
    };

    if cfg!(windows) {
        kill_command("taskkill", &["/F", "/T", "/PID", &pid.to_string()]).await;
    } else {
        kill_command("kill", &["-TERM", &pid.to_string()]).await;
    }

    match timeout(TERMINATION_GRACE, child.wait()).await {
        Ok(status) => exit_code(status),
        Err(_) => {
            debug!(pid, "grace period elapsed; hard-killing supervised process");
            if let Err(err) = child.start_kill() {
                warn!(pid, error = %err, "failed to hard-kill supervised process");
            }
            exit_code(child.wait().await)
        }
    }
}

/// Run an OS kill utility against the child's pid, discarding its output.
async fn kill_command(program: &str, args: &[&str]) {
    let result = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    if let Err(err) = result {
        debug!(program, error = %err, "termination helper failed to run");
    }
}

fn exit_code(status: std::io::Result<std::process::ExitStatus>) -> i32 {
    match status {
        Ok(status) => status.code().unwrap_or(ABNORMAL_EXIT),
        Err(err) => {
            warn!(error = %err, "failed to wait for supervised process");
            ABNORMAL_EXIT
        }
    }
}
