// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent Lifecycle Controller (spec §4.5): spawns a new agent into a new
//! window, delivers its role briefing, verifies readiness, restarts a
//! failing agent in place, and terminates agents cleanly.
//!
//! Grounded on `original_source/tmux_orchestrator/core/team_operations/deploy_team.py`'s
//! spawn sequence (session → per-role window → launch command → readiness
//! wait → briefing delivery).

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::{Duration, Instant};

use fs2::FileExt;
use orc_adapters::session::SessionAdapter;
use orc_core::{has_readiness_indicator, AgentRole, OrcError, PaneTarget};
use orc_messaging::{chunk_default, submit, SubmitterConfig};

use crate::env::Paths;
use crate::pause;

/// Command used to launch the interactive agent inside a freshly created
/// window. Not user-configurable per spec's scope (the CLI argument surface
/// that would expose this is out of scope); callers needing a different
/// binary construct their own [`LifecycleConfig`].
pub const DEFAULT_LAUNCH_COMMAND: &str = "claude";

/// Window name used for a session's throwaway first window — deliberately
/// not matching any agent-role pattern so it's never mistaken for an agent.
pub const PLACEHOLDER_WINDOW_NAME: &str = "shell";

/// Bounded wait for a readiness indicator after launching the agent process.
const READY_WAIT_TIMEOUT: Duration = Duration::from_secs(8);
const READY_WAIT_POLL: Duration = Duration::from_millis(250);

/// Duration the Supervisor is paused while a (particularly a PM) spawn is
/// in flight, so it doesn't observe the half-initialized window and fire a
/// recovery (spec §4.5 "Pause-during-spawn").
const SPAWN_PAUSE: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    pub launch_command: String,
    pub tail_lines: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self { launch_command: DEFAULT_LAUNCH_COMMAND.to_string(), tail_lines: orc_messaging::CAPTURE_TAIL_LINES }
    }
}

pub struct LifecycleController<A: SessionAdapter> {
    adapter: A,
    paths: Paths,
    config: LifecycleConfig,
}

impl<A: SessionAdapter> LifecycleController<A> {
    pub fn new(adapter: A, paths: Paths, config: LifecycleConfig) -> Self {
        Self { adapter, paths, config }
    }

    /// Acquires the cross-process spawn slot guarding the check-existing/
    /// create-window sequence below (spec §8 scenario 4): a competing
    /// `spawn()` already holding the lock means a spawn for *some* role in
    /// *some* session is in flight, so this one fails fast instead of racing
    /// it to `resolve_window`/`create_window`. Released once the window is
    /// created; the slower readiness-wait and briefing-delivery steps run
    /// without holding it.
    fn claim_spawn_slot(&self) -> Result<File, OrcError> {
        self.paths.ensure_dirs().map_err(|e| OrcError::TransportError(e.to_string()))?;
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .open(&self.paths.spawn_lock)
            .map_err(|e| OrcError::TransportError(format!("open spawn lock: {e}")))?;
        lock_file
            .try_lock_exclusive()
            .map_err(|_| OrcError::RateLimited("a spawn is already in progress; retry once it completes".to_string()))?;
        Ok(lock_file)
    }

    /// Spawns `role` into `session`, delivering `briefing` once the agent's
    /// UI is ready. Returns the resolved [`PaneTarget`].
    pub async fn spawn(
        &self,
        session: &str,
        role: AgentRole,
        cwd: &Path,
        briefing: &str,
    ) -> Result<PaneTarget, OrcError> {
        let slot = self.claim_spawn_slot()?;

        // Pause the Supervisor for the duration of the spawn sequence so it
        // doesn't classify the half-initialized window as crashed/unresponsive.
        let _ = pause::pause_for(&self.paths, SPAWN_PAUSE);

        if !self.adapter.has_session(session).await.map_err(OrcError::from)? {
            self.adapter
                .create_session(session, PLACEHOLDER_WINDOW_NAME, cwd)
                .await
                .map_err(OrcError::from)?;
        }

        let window_name = role.window_name();
        if let Ok(existing) = self.adapter.resolve_window(session, &window_name).await {
            // Replacement semantics: an agent of this role is already present.
            self.adapter
                .kill_window(&PaneTarget::new(session, existing))
                .await
                .map_err(OrcError::from)?;
        }

        let index = self.adapter.create_window(session, &window_name, cwd).await.map_err(OrcError::from)?;
        let target = PaneTarget::new(session, index);

        let _ = fs2::FileExt::unlock(&slot);
        drop(slot);

        self.adapter.send_keys(&target, &self.config.launch_command, false).await.map_err(OrcError::from)?;
        self.adapter.send_keys(&target, "Enter", false).await.map_err(OrcError::from)?;

        self.wait_for_ready(session, &target).await?;

        if let Err(e) = self.deliver_briefing(&target, briefing).await {
            tracing::warn!(%target, error = %e, "briefing delivery failed, falling back to briefing file");
            self.write_briefing_fallback(&target, briefing).await?;
        }

        Ok(target)
    }

    /// Bounded wait for a readiness indicator, checking on every tick that
    /// the window hasn't disappeared out from under us (window-killer
    /// protection, spec §4.5).
    async fn wait_for_ready(&self, session: &str, target: &PaneTarget) -> Result<(), OrcError> {
        let deadline = Instant::now() + READY_WAIT_TIMEOUT;
        loop {
            let windows = self.adapter.list_windows(session).await.map_err(OrcError::from)?;
            if !windows.iter().any(|w| w.index == target.window) {
                return Err(OrcError::TransportError(format!("window {target} disappeared during spawn wait")));
            }

            let tail = self.adapter.capture_pane(target, self.config.tail_lines).await.map_err(OrcError::from)?;
            if has_readiness_indicator(&tail) {
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(OrcError::Timeout(format!("{target} did not become ready within {READY_WAIT_TIMEOUT:?}")));
            }
            tokio::time::sleep(READY_WAIT_POLL).await;
        }
    }

    async fn deliver_briefing(&self, target: &PaneTarget, briefing: &str) -> Result<(), OrcError> {
        let plan = chunk_default(briefing);
        submit(&self.adapter, target, &plan, SubmitterConfig::default()).await
    }

    /// Fallback path (spec §4.4): write the briefing to the briefings
    /// directory and send a one-line pointer instead.
    async fn write_briefing_fallback(&self, target: &PaneTarget, briefing: &str) -> Result<(), OrcError> {
        self.paths.ensure_dirs().map_err(|e| OrcError::TransportError(e.to_string()))?;
        let path = self.paths.briefing_path(&target.session, target.window);
        std::fs::write(&path, briefing).map_err(|e| OrcError::TransportError(e.to_string()))?;

        let pointer = format!("please read {}", path.display());
        let plan = chunk_default(&pointer);
        submit(&self.adapter, target, &plan, SubmitterConfig::default()).await
    }

    /// Restarts a failing agent in place: interrupt, clear the line,
    /// relaunch. The briefing is not re-sent — the agent is expected to
    /// rehydrate its own context from a stored location (spec §4.5).
    pub async fn restart(&self, target: &PaneTarget) -> Result<(), OrcError> {
        self.adapter.send_keys(target, "C-c", false).await.map_err(OrcError::from)?;
        tokio::time::sleep(Duration::from_secs(1)).await;
        self.adapter.send_keys(target, "C-u", false).await.map_err(OrcError::from)?;
        self.adapter.send_keys(target, &self.config.launch_command, false).await.map_err(OrcError::from)?;
        self.adapter.send_keys(target, "Enter", false).await.map_err(OrcError::from)?;
        Ok(())
    }

    pub async fn kill(&self, target: &PaneTarget) -> Result<(), OrcError> {
        self.adapter.kill_window(target).await.map_err(OrcError::from)
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
