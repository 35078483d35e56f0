//! Singleton enforcement (spec §8 scenario 5 / spec §4.6): a second
//! `monitor start` against the same install root must not succeed.

use serial_test::serial;

use crate::prelude::{wait_for, Project};

#[test]
#[serial]
fn second_start_fails_already_running() {
    let project = Project::empty();

    project.orc().args(&["monitor", "start"]).passes();
    assert!(wait_for(5_000, || project.is_running()));

    let assert = project.orc().args(&["--json", "monitor", "start"]).fails();
    let value = assert.stdout_json();
    assert_eq!(value["error_type"], "already_running");
}
