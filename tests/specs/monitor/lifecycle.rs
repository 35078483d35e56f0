//! `monitor start|stop|status` round-trip (spec §8 scenario: daemon lifecycle).

use serial_test::serial;

use crate::prelude::{wait_for, Project};

#[test]
#[serial]
fn start_then_status_then_stop() {
    let project = Project::empty();

    project.orc().args(&["monitor", "start"]).passes();
    assert!(wait_for(5_000, || project.is_running()), "daemon.pid should appear after monitor start");

    let status = project.orc().args(&["--json", "monitor", "status"]).passes();
    let value = status.stdout_json();
    assert_eq!(value["running"], true);
    assert!(value["pid"].is_number());

    project.orc().args(&["monitor", "stop"]).passes();
    assert!(wait_for(10_000, || !project.is_running()), "daemon.pid should disappear after monitor stop");
}

#[test]
#[serial]
fn stop_without_running_daemon_is_idempotent() {
    let project = Project::empty();

    let assert = project.orc().args(&["--json", "monitor", "stop"]).passes();
    let value = assert.stdout_json();
    assert_eq!(value["stopped"], false);
}

#[test]
#[serial]
fn status_without_running_daemon_reports_not_running() {
    let project = Project::empty();

    let assert = project.orc().args(&["--json", "monitor", "status"]).passes();
    let value = assert.stdout_json();
    assert_eq!(value["running"], false);
    assert!(value["pid"].is_null());
}
