// src/supervisor/event.rs

//! Events emitted by a running supervisor and the sink that receives them.
//!
//! The supervisor talks to its caller through an [`EventSink`] instead of a
//! concrete channel. Callers that need delivery marshalled onto their own
//! thread (a UI loop) use [`ChannelSink`] and drain the receiver themselves;
//! tests can record events with their own sink implementation.

use tokio::sync::mpsc;

/// Exit code reported when the supervised process ended abnormally: it
/// could not be started, or it was killed before reporting a code.
pub const ABNORMAL_EXIT: i32 = -1;

/// One callback-worth of information from a running supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisorEvent {
    /// A complete line of process output.
    ///
    /// `is_error` is true for stderr lines and for supervisor diagnostics
    /// (spawn failures, stream read errors).
    Output { line: String, is_error: bool },

    /// The process is gone. Always the last event for a supervisor, and
    /// emitted exactly once.
    Completed { code: i32 },
}

/// Receiver side of a supervisor's callbacks.
///
/// `output` is invoked from the supervisor's reader tasks for every line the
/// process produces, so implementations must not block. A sink that needs to
/// hand events to a specific thread should forward them into a channel (see
/// [`ChannelSink`]) rather than synchronise inline.
pub trait EventSink: Send + Sync + 'static {
    /// One line of stdout (`is_error == false`) or stderr (`true`).
    fn output(&self, line: &str, is_error: bool);

    /// Final exit code, or [`ABNORMAL_EXIT`].
    fn completed(&self, code: i32);
}

/// Sink that forwards events into an unbounded channel.
///
/// The supervisor's reader tasks push events here and the caller drains the
/// receiver on whatever thread owns its state, so no callback ever runs on a
/// context the caller does not control. Send failures mean the receiver is
/// gone and are ignored.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<SupervisorEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SupervisorEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn output(&self, line: &str, is_error: bool) {
        let _ = self.tx.send(SupervisorEvent::Output {
            line: line.to_string(),
            is_error,
        });
    }

    fn completed(&self, code: i32) {
        let _ = self.tx.send(SupervisorEvent::Completed { code });
    }
}
