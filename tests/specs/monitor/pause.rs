//! `monitor pause <seconds>` (spec §6's documented 1..=300 second range).

use serial_test::serial;

use crate::prelude::{wait_for, Project};

#[test]
#[serial]
fn pause_without_running_daemon_is_not_found() {
    let project = Project::empty();

    project.orc().args(&["monitor", "pause", "30"]).exits_with(2).stderr_has("not running");
}

#[test]
#[serial]
fn pause_rejects_out_of_range_seconds() {
    let project = Project::empty();

    project.orc().args(&["monitor", "pause", "0"]).exits_with(2).stderr_has("1..=300");
    project.orc().args(&["monitor", "pause", "301"]).exits_with(2).stderr_has("1..=300");
}

#[test]
#[serial]
fn pause_reflected_in_status_while_running() {
    let project = Project::empty();

    project.orc().args(&["monitor", "start"]).passes();
    assert!(wait_for(5_000, || project.is_running()));

    project.orc().args(&["monitor", "pause", "60"]).passes();

    let assert = project.orc().args(&["--json", "monitor", "status"]).passes();
    let value = assert.stdout_json();
    assert_eq!(value["paused"], true);
    let remaining = value["paused_for_seconds"].as_u64().expect("paused_for_seconds should be set");
    assert!(remaining > 0 && remaining <= 60);
}
