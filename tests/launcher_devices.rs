#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use mirrorctl::errors::MirrorctlError;
use mirrorctl::launcher::list_devices;
use mirrorctl::supervisor::CommandSpec;
use mirrorctl_test_utils::init_tracing;

fn write_fake_adb(dir: &Path, script: &str) {
    let path = dir.join("adb");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[tokio::test]
async fn list_devices_runs_the_bridge_and_parses_rows() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    write_fake_adb(
        dir.path(),
        "#!/bin/sh\n\
         printf 'List of devices attached\\nemulator-5554\\tdevice\\nR58M1\\tunauthorized\\n'\n",
    );

    let base = CommandSpec::default()
        .exec_prefix("./")
        .tool_dir(dir.path());
    let devices = list_devices(&base).await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].serial, "emulator-5554");
    assert!(devices[0].is_connected());
    assert_eq!(devices[1].serial, "R58M1");
    assert!(!devices[1].is_connected());
}

#[tokio::test]
async fn failing_bridge_surfaces_tool_failure() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    write_fake_adb(dir.path(), "#!/bin/sh\nexit 9\n");

    let base = CommandSpec::default()
        .exec_prefix("./")
        .tool_dir(dir.path());
    let err = list_devices(&base).await.unwrap_err();

    assert!(matches!(err, MirrorctlError::ToolFailed { code: 9, .. }));
}
