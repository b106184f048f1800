// src/supervisor/session.rs

//! Caller-owned tracking of live supervisors.

use tracing::info;

use crate::errors::Result;

use super::event::EventSink;
use super::handle::Supervisor;
use super::spec::CommandSpec;

/// A mutable collection of active [`Supervisor`] handles.
///
/// Plain caller-owned state: sessions are independently constructible and
/// share nothing with each other. Dropping a session does not touch the
/// processes; call [`Session::stop_all`] first for teardown.
#[derive(Default)]
pub struct Session {
    active: Vec<Supervisor>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a supervisor for `spec` and track it.
    pub fn spawn(&mut self, spec: &CommandSpec, sink: impl EventSink) -> Result<()> {
        let supervisor = Supervisor::spawn(spec, sink)?;
        self.active.push(supervisor);
        Ok(())
    }

    /// Track an already-spawned supervisor.
    pub fn track(&mut self, supervisor: Supervisor) {
        self.active.push(supervisor);
    }

    /// Drop handles whose read loop has finished.
    pub fn prune_finished(&mut self) {
        self.active.retain(|s| !s.is_finished());
    }

    /// Request termination of every tracked process.
    ///
    /// Only owned handles are signalled; nothing is matched by executable
    /// name. Each process still reports completion through its own sink.
    /// Handles stay tracked until pruned, so repeated calls remain safe.
    pub fn stop_all(&mut self) {
        info!(count = self.active.len(), "stopping all supervised processes");
        for supervisor in &self.active {
            supervisor.terminate();
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
