#![cfg(unix)]

use mirrorctl::errors::MirrorctlError;
use mirrorctl::supervisor::{ABNORMAL_EXIT, CommandSpec, Supervisor, SupervisorEvent};
use mirrorctl_test_utils::{init_tracing, recording::RecordingSink, with_timeout};

#[tokio::test]
async fn stdout_lines_arrive_in_order_with_exit_zero() {
    init_tracing();
    let sink = RecordingSink::new();
    let spec = CommandSpec::new("echo one; echo two; echo three");
    let _supervisor = Supervisor::spawn(&spec, sink.clone()).unwrap();

    let code = with_timeout(sink.wait_completed()).await;
    assert_eq!(code, 0);
    assert_eq!(sink.lines(false), vec!["one", "two", "three"]);
}

#[tokio::test]
async fn exit_code_is_reported_verbatim() {
    init_tracing();
    let sink = RecordingSink::new();
    let _supervisor = Supervisor::spawn(&CommandSpec::new("exit 7"), sink.clone()).unwrap();

    assert_eq!(with_timeout(sink.wait_completed()).await, 7);
}

#[tokio::test]
async fn stderr_lines_are_tagged_as_errors() {
    init_tracing();
    let sink = RecordingSink::new();
    let spec = CommandSpec::new("echo out; echo oops 1>&2; exit 3");
    let _supervisor = Supervisor::spawn(&spec, sink.clone()).unwrap();

    assert_eq!(with_timeout(sink.wait_completed()).await, 3);
    assert_eq!(sink.lines(false), vec!["out"]);
    assert_eq!(sink.lines(true), vec!["oops"]);
}

#[tokio::test]
async fn completion_is_the_last_event_and_unique() {
    init_tracing();
    let sink = RecordingSink::new();
    let spec = CommandSpec::new("echo a; echo b");
    let _supervisor = Supervisor::spawn(&spec, sink.clone()).unwrap();
    with_timeout(sink.wait_completed()).await;

    let events = sink.events();
    let completions = events
        .iter()
        .filter(|e| matches!(e, SupervisorEvent::Completed { .. }))
        .count();
    assert_eq!(completions, 1);
    assert!(matches!(
        events.last(),
        Some(SupervisorEvent::Completed { .. })
    ));
}

#[tokio::test]
async fn unresolvable_command_reports_failure_with_diagnostic() {
    init_tracing();
    let sink = RecordingSink::new();
    let spec = CommandSpec::new("definitely-not-a-real-binary-1b9c");
    let _supervisor = Supervisor::spawn(&spec, sink.clone()).unwrap();

    // The shell reports the missing binary: non-zero exit plus a stderr
    // line naming the command.
    let code = with_timeout(sink.wait_completed()).await;
    assert_ne!(code, 0);
    assert!(!sink.lines(true).is_empty());
}

#[tokio::test]
async fn spawn_failure_yields_sentinel_and_diagnostic() {
    init_tracing();
    let sink = RecordingSink::new();
    let spec = CommandSpec::new("echo never").working_dir("/definitely/not/a/dir");
    let _supervisor = Supervisor::spawn(&spec, sink.clone()).unwrap();

    assert_eq!(with_timeout(sink.wait_completed()).await, ABNORMAL_EXIT);
    assert!(!sink.lines(true).is_empty());
    assert!(sink.lines(false).is_empty());
}

#[tokio::test]
async fn blank_command_fails_fast() {
    init_tracing();
    let err = Supervisor::spawn(&CommandSpec::new("  "), RecordingSink::new()).unwrap_err();
    assert!(matches!(err, MirrorctlError::InvalidCommand(_)));
}

#[tokio::test]
async fn long_running_output_is_incremental() {
    init_tracing();
    let sink = RecordingSink::new();
    let spec = CommandSpec::new("echo early; exec sleep 5");
    let supervisor = Supervisor::spawn(&spec, sink.clone()).unwrap();

    // Early output must be observable while the process is still running.
    with_timeout(async {
        while sink.lines(false).is_empty() {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
    })
    .await;

    assert!(sink.exit_code().is_none(), "process should still be running");
    assert_eq!(sink.lines(false), vec!["early"]);

    supervisor.terminate();
    with_timeout(sink.wait_completed()).await;
}
