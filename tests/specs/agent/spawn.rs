//! `agent spawn` against a real multiplexer (spec §8 scenario: first-agent
//! spawn). Requires `tmux`; does not require the `claude` binary itself —
//! when the launch command never produces a readiness indicator, spawn is
//! expected to time out rather than hang or silently succeed, which is
//! exactly the behavior this spec asserts.

use std::process::Command;

use crate::prelude::{cli, require_tmux};

fn tmux_has_session(name: &str) -> bool {
    Command::new("tmux")
        .args(["has-session", "-t", name])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn tmux_kill_session(name: &str) {
    let _ = Command::new("tmux").args(["kill-session", "-t", name]).status();
}

#[test]
fn spawn_without_a_ready_agent_times_out_but_creates_the_window() {
    require_tmux();

    let session = "orc-spec-spawn-timeout";
    tmux_kill_session(session); // in case a prior failed run left it behind

    let dir = tempfile::tempdir().unwrap();
    let assert = cli()
        .env("TMUX_ORC_HOME", dir.path())
        .pwd(dir.path())
        .args(&["agent", "spawn", "backend", session])
        .fails();
    assert.stderr_has("timed out");

    assert!(tmux_has_session(session), "tmux session should exist even though the agent never became ready");

    tmux_kill_session(session);
}
