// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Install-root resolution and the persisted state layout (spec §6).

use std::path::{Path, PathBuf};

/// Environment variable overriding the install root. Defaults to
/// `./.tmux_orc/` when unset.
pub const HOME_ENV: &str = "TMUX_ORC_HOME";

/// Environment variable overriding the log directory independent of the
/// install root.
pub const LOG_DIR_ENV: &str = "TMUX_ORC_LOG_DIR";

/// Resolves the install root: `$TMUX_ORC_HOME` if set, else `./.tmux_orc/`.
pub fn install_root() -> PathBuf {
    std::env::var_os(HOME_ENV).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("./.tmux_orc"))
}

/// Every path the daemon and CLI need under a given install root, per
/// spec §6's persisted state layout.
#[derive(Debug, Clone)]
pub struct Paths {
    pub root: PathBuf,
    pub pid_file: PathBuf,
    pub start_lock: PathBuf,
    pub spawn_lock: PathBuf,
    pub pause_file: PathBuf,
    pub graceful_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_file: PathBuf,
    pub briefings_dir: PathBuf,
}

impl Paths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let log_dir = std::env::var_os(LOG_DIR_ENV).map(PathBuf::from).unwrap_or_else(|| root.join("logs"));
        Self {
            pid_file: root.join("daemon.pid"),
            start_lock: root.join("daemon.start.lock"),
            // Guards the Lifecycle Controller's check-existing/create-window
            // sequence (spec §4.5, §8 scenario 4) the same way `start_lock`
            // guards the singleton's read-PID/write-PID sequence (§4.6).
            spawn_lock: root.join("spawn.lock"),
            pause_file: root.join("daemon.pause"),
            graceful_file: root.join("daemon.graceful"),
            log_file: log_dir.join("monitor.log"),
            briefings_dir: root.join("briefings"),
            log_dir,
            root,
        }
    }

    /// Resolves paths from the environment (`$TMUX_ORC_HOME`, `$TMUX_ORC_LOG_DIR`).
    pub fn from_env() -> Self {
        Self::new(install_root())
    }

    /// Path of the fallback briefing drop for one pane (spec §6).
    pub fn briefing_path(&self, session: &str, window: u32) -> PathBuf {
        self.briefings_dir.join(format!("briefing_{session}_{window}.txt"))
    }

    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(&self.log_dir)?;
        std::fs::create_dir_all(&self.briefings_dir)
    }
}

/// True if `path`'s parent directories exist (a cheap sanity check used
/// before atomic sentinel writes).
pub fn parent_exists(path: &Path) -> bool {
    path.parent().map(Path::exists).unwrap_or(false)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
