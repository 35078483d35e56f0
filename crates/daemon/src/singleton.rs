// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor singleton enforcement (spec §4.6, §5): an exclusive file lock
//! on `daemon.start.lock` guards the read-PID/write-PID sequence so two
//! concurrent `monitor start` invocations can't both observe "no PID file"
//! and both proceed.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::time::Duration;

use fs2::FileExt;
use orc_core::OrcError;

use crate::env::Paths;

/// How long `monitor start` waits for the start lock before failing fast.
const LOCK_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Held for the lifetime of the daemon process; the file lock (and the
/// `daemon.pid` file it guarded) releases/remains-until-removed when this
/// drops.
pub struct SingletonGuard {
    _lock_file: File,
    pid_path: std::path::PathBuf,
}

impl SingletonGuard {
    /// Removes `daemon.pid`. Called on graceful shutdown; an ungraceful exit
    /// leaves the file for the next `monitor start` to reclaim.
    pub fn remove_pid_file(&self) {
        let _ = fs::remove_file(&self.pid_path);
    }
}

/// True if a process with `pid` is alive, via `kill -0`. POSIX-only, per
/// spec §9's open question on Windows file-lock/PID-liveness semantics.
fn pid_alive(pid: u32) -> bool {
    std::process::Command::new("kill")
        .args(["-0", &pid.to_string()])
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn atomic_write_pid(path: &std::path::Path, pid: u32) -> std::io::Result<()> {
    let tmp_path = path.with_extension("pid.tmp");
    {
        let mut tmp = OpenOptions::new().write(true).create(true).truncate(true).open(&tmp_path)?;
        writeln!(tmp, "{pid}")?;
        tmp.sync_all()?;
    }
    fs::rename(&tmp_path, path)
}

/// Acquires process-wide singleton ownership for the Supervisor, per §4.6:
///
/// 1. Exclusive lock on `daemon.start.lock` (blocking with a timeout).
/// 2. Read `daemon.pid`; if it names a live daemon process, fail with
///    `AlreadyRunning`.
/// 3. Otherwise (no PID file, or a stale one), write the current PID
///    atomically and return a guard that owns the lock for the process
///    lifetime.
pub fn acquire(paths: &Paths) -> Result<SingletonGuard, OrcError> {
    paths.ensure_dirs().map_err(|e| OrcError::TransportError(e.to_string()))?;

    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&paths.start_lock)
        .map_err(|e| OrcError::TransportError(format!("open start lock: {e}")))?;

    let deadline = std::time::Instant::now() + LOCK_ACQUIRE_TIMEOUT;
    loop {
        match lock_file.try_lock_exclusive() {
            Ok(()) => break,
            Err(_) if std::time::Instant::now() < deadline => std::thread::sleep(LOCK_POLL_INTERVAL),
            Err(e) => return Err(OrcError::TransportError(format!("start lock busy: {e}"))),
        }
    }

    if let Ok(existing) = fs::read_to_string(&paths.pid_file) {
        if let Ok(pid) = existing.trim().parse::<u32>() {
            if pid_alive(pid) {
                let _ = fs2::FileExt::unlock(&lock_file);
                return Err(OrcError::AlreadyRunning { pid });
            }
        }
        // Stale PID file (process not alive) — reclaimed below.
    }

    atomic_write_pid(&paths.pid_file, std::process::id())
        .map_err(|e| OrcError::TransportError(format!("write pid file: {e}")))?;

    let _ = fs2::FileExt::unlock(&lock_file);

    Ok(SingletonGuard { _lock_file: lock_file, pid_path: paths.pid_file.clone() })
}

/// Reads the PID of a currently-running daemon, if any (used by `monitor
/// status`/`monitor stop` without holding the start lock).
pub fn running_pid(paths: &Paths) -> Option<u32> {
    let existing = fs::read_to_string(&paths.pid_file).ok()?;
    let pid: u32 = existing.trim().parse().ok()?;
    pid_alive(pid).then_some(pid)
}

#[cfg(test)]
#[path = "singleton_tests.rs"]
mod tests;
