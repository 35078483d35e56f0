//! Error envelope and exit-code behavior (spec §7).

use crate::prelude::cli;

#[test]
fn malformed_pane_target_is_bad_argument() {
    cli()
        .args(&["agent", "kill", "not-a-target"])
        .exits_with(2)
        .stderr_has("bad argument");
}

#[test]
fn pause_out_of_range_json_envelope_carries_error_type() {
    let dir = tempfile::tempdir().unwrap();
    let assert =
        cli().env("TMUX_ORC_HOME", dir.path()).args(&["--json", "monitor", "pause", "0"]).exits_with(2);
    let value = assert.stdout_json();
    assert_eq!(value["success"], false);
    assert_eq!(value["error_type"], "bad_argument");
}

#[test]
fn agent_status_without_daemon_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .env("TMUX_ORC_HOME", dir.path())
        .args(&["agent", "status"])
        .exits_with(2)
        .stderr_has("supervisor is not running");
}
