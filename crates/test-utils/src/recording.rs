use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use mirrorctl::supervisor::{EventSink, SupervisorEvent};

/// A sink that records every event a supervisor delivers and wakes waiters
/// on completion.
///
/// Clones share the same recording, so tests keep one handle and hand
/// another to `Supervisor::spawn`.
#[derive(Clone, Default)]
pub struct RecordingSink {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    events: Mutex<Vec<SupervisorEvent>>,
    completed: Notify,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, in delivery order.
    pub fn events(&self) -> Vec<SupervisorEvent> {
        self.inner
            .events
            .lock()
            .expect("recording sink lock poisoned")
            .clone()
    }

    /// Output lines from one stream (stderr when `errors` is true), in
    /// delivery order.
    pub fn lines(&self, errors: bool) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SupervisorEvent::Output { line, is_error } if is_error == errors => Some(line),
                _ => None,
            })
            .collect()
    }

    /// Exit code, if completion has been delivered.
    pub fn exit_code(&self) -> Option<i32> {
        self.events().into_iter().find_map(|event| match event {
            SupervisorEvent::Completed { code } => Some(code),
            _ => None,
        })
    }

    /// Wait until `completed` is delivered, returning the exit code.
    pub async fn wait_completed(&self) -> i32 {
        loop {
            let notified = self.inner.completed.notified();
            if let Some(code) = self.exit_code() {
                return code;
            }
            notified.await;
        }
    }
}

impl EventSink for RecordingSink {
    fn output(&self, line: &str, is_error: bool) {
        if let Ok(mut events) = self.inner.events.lock() {
            events.push(SupervisorEvent::Output {
                line: line.to_string(),
                is_error,
            });
        }
    }

    fn completed(&self, code: i32) {
        if let Ok(mut events) = self.inner.events.lock() {
            events.push(SupervisorEvent::Completed { code });
        }
        self.inner.completed.notify_waiters();
    }
}
