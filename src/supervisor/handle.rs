// src/supervisor/handle.rs

//! Public handle for one supervised process.

use std::fmt;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::errors::Result;

use super::event::EventSink;
use super::runner::run_command;
use super::spec::CommandSpec;

/// Owns at most one live external process.
///
/// Created with [`Supervisor::spawn`]. The read loop runs on its own tokio
/// task and never blocks the caller; output and completion arrive through
/// the sink given at spawn time. The lifecycle is monotonic: once the sink
/// has seen `completed`, the supervisor emits nothing further.
pub struct Supervisor {
    cancel: Mutex<Option<oneshot::Sender<()>>>,
    runner: JoinHandle<()>,
}

impl fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("finished", &self.runner.is_finished())
            .finish_non_exhaustive()
    }
}

impl Supervisor {
    /// Validate `spec` and start the command.
    ///
    /// Fails only on an invalid (blank) command. Spawn failures are
    /// reported through the sink — a diagnostic line followed by
    /// `completed(ABNORMAL_EXIT)` — never as an error here.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(spec: &CommandSpec, sink: impl EventSink) -> Result<Self> {
        let resolved = spec.resolve()?;
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let sink: Arc<dyn EventSink> = Arc::new(sink);
        let runner = tokio::spawn(run_command(resolved, sink, cancel_rx));

        Ok(Self {
            cancel: Mutex::new(Some(cancel_tx)),
            runner,
        })
    }

    /// Request forced termination of the owned process, if one is still
    /// running.
    ///
    /// Asynchronous: the `completed` callback, not this call returning,
    /// signals that the process has actually stopped. Idempotent, a no-op
    /// after natural completion, and never fails.
    pub fn terminate(&self) {
        if let Ok(mut cancel) = self.cancel.lock() {
            if let Some(tx) = cancel.take() {
                if tx.send(()).is_err() {
                    debug!("supervised process already finished; nothing to terminate");
                }
            }
        }
    }

    /// Whether the read loop has finished (process gone, completion
    /// delivered).
    pub fn is_finished(&self) -> bool {
        self.runner.is_finished()
    }
}
