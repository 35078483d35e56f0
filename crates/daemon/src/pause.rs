// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler / Pause Gate (spec §4.8): a timed pause sentinel the Supervisor
//! loop checks every tick, plus a deferred one-shot used by the Lifecycle
//! Controller to send a briefing once a freshly spawned agent has had time
//! to finish wiring up its UI.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::env::Paths;

fn now_epoch() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

/// Writes the pause sentinel with a deadline `duration` from now. Atomic
/// temp+rename, matching the PID-file write idiom.
pub fn pause_for(paths: &Paths, duration: Duration) -> std::io::Result<()> {
    let deadline = now_epoch() + duration.as_secs();
    let tmp_path = paths.pause_file.with_extension("pause.tmp");
    std::fs::write(&tmp_path, deadline.to_string())?;
    std::fs::rename(&tmp_path, &paths.pause_file)
}

/// True if the pause sentinel is present and its deadline hasn't passed.
/// A present-but-expired sentinel is treated as not paused (and is left in
/// place; the Supervisor doesn't need to delete it — the next `pause_for`
/// overwrites it, and a stale one simply stops taking effect).
pub fn is_paused(paths: &Paths) -> bool {
    let Ok(contents) = std::fs::read_to_string(&paths.pause_file) else {
        return false;
    };
    let Ok(deadline) = contents.trim().parse::<u64>() else {
        return false;
    };
    now_epoch() < deadline
}

/// Seconds remaining before the pause sentinel's deadline, or `None` if
/// absent or already expired.
pub fn seconds_remaining(paths: &Paths) -> Option<u64> {
    let contents = std::fs::read_to_string(&paths.pause_file).ok()?;
    let deadline: u64 = contents.trim().parse().ok()?;
    let now = now_epoch();
    (now < deadline).then_some(deadline - now)
}

pub fn clear(paths: &Paths) -> std::io::Result<()> {
    match std::fs::remove_file(&paths.pause_file) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Spawns a cooperative one-shot task that runs `action` after `delay`,
/// without blocking the caller. Grounded on the teacher's "background tokio
/// task on an interval, no separate process" idiom for deferred work.
pub fn defer<F>(delay: Duration, action: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        action.await;
    });
}

#[cfg(test)]
#[path = "pause_tests.rs"]
mod tests;
