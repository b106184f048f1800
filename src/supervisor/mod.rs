// src/supervisor/mod.rs

//! Asynchronous external-process supervision.
//!
//! One [`Supervisor`] wraps at most one live external process: it spawns a
//! shell-interpreted command, relays each output line to an [`EventSink`] as
//! soon as it is produced, reports the exit code exactly once, and supports
//! best-effort forced termination.
//!
//! - [`spec`] resolves a [`CommandSpec`] into the final shell line.
//! - [`event`] defines the events and the sink seam callers implement.
//! - [`runner`] owns the per-process read loop.
//! - [`handle`] is the public `Supervisor` handle.
//! - [`session`] tracks a set of live supervisors for bulk teardown.

pub mod event;
pub mod handle;
pub mod runner;
pub mod session;
pub mod spec;

pub use event::{ABNORMAL_EXIT, ChannelSink, EventSink, SupervisorEvent};
pub use handle::Supervisor;
pub use runner::TERMINATION_GRACE;
pub use session::Session;
pub use spec::{CommandSpec, ResolvedCommand};
