// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent Supervisor (spec §4.6): the periodic discover → classify → decide →
//! apply loop. Single-writer against the in-memory agent table; the only
//! component that issues recovery actions.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use orc_adapters::session::SessionAdapter;
use orc_core::{classify_pane, AgentRecord, AgentRole, OrcError, PaneState, PaneTarget, RecoveryDecision};
use orc_messaging::{chunk_default, submit, SubmitterConfig};
use parking_lot::Mutex;

use crate::env::Paths;
use crate::lifecycle::{LifecycleConfig, LifecycleController};
use crate::pause;

/// Minimum tick interval the spec enforces (§4.6).
pub const MIN_TICK_INTERVAL: Duration = Duration::from_secs(10);

/// Tail length captured each tick for classification.
const TAIL_LINES: u32 = 100;

/// Crash-loop backoff defaults (spec §4.6; configurable, not environment
/// variables — these are policy, not deployment config, per DESIGN.md's
/// resolution of spec §9's open question).
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    pub max_attempts: u32,
    pub window: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, window: Duration::from_secs(10 * 60) }
    }
}

pub type AgentTable = Arc<Mutex<HashMap<PaneTarget, AgentRecord>>>;

/// Pure decision function: spec §4.6's table, plus crash-loop suppression.
/// A function of `(record, new_state, now, backoff)` only — no I/O.
pub fn decide(record: &AgentRecord, new_state: PaneState, now: Instant, backoff: BackoffPolicy) -> RecoveryDecision {
    let rate_limited = match record.last_recovery_at {
        Some(t) if now.saturating_duration_since(t) <= backoff.window => {
            record.recovery_attempts_in_window >= backoff.max_attempts
        }
        _ => false,
    };

    match new_state {
        PaneState::Starting | PaneState::Ready | PaneState::Busy => RecoveryDecision::NoOp,
        PaneState::Idle => {
            if record.state == PaneState::Idle {
                RecoveryDecision::NoOp
            } else {
                RecoveryDecision::SendNudge { target: record.target.clone(), message: "status?".to_string() }
            }
        }
        PaneState::Unresponsive => {
            if record.state != PaneState::Unresponsive {
                RecoveryDecision::SendNudge { target: record.target.clone(), message: "status?".to_string() }
            } else if rate_limited {
                RecoveryDecision::NoOp
            } else {
                RecoveryDecision::Restart { target: record.target.clone() }
            }
        }
        PaneState::Crashed => {
            if rate_limited {
                RecoveryDecision::NoOp
            } else if matches!(record.role, AgentRole::Pm) {
                RecoveryDecision::RespawnPm { session: record.target.session.clone() }
            } else {
                RecoveryDecision::Restart { target: record.target.clone() }
            }
        }
        PaneState::Gone => RecoveryDecision::MarkMissing { target: record.target.clone() },
    }
}

pub struct Supervisor<A: SessionAdapter> {
    adapter: A,
    lifecycle: LifecycleController<A>,
    table: AgentTable,
    in_flight: Arc<Mutex<HashSet<PaneTarget>>>,
    backoff: BackoffPolicy,
    paths: Paths,
}

impl<A: SessionAdapter> Supervisor<A> {
    pub fn new(adapter: A, paths: Paths, backoff: BackoffPolicy) -> Self {
        let lifecycle = LifecycleController::new(adapter.clone(), paths.clone(), LifecycleConfig::default());
        Self {
            adapter,
            lifecycle,
            table: Arc::new(Mutex::new(HashMap::new())),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            backoff,
            paths,
        }
    }

    pub fn table(&self) -> AgentTable {
        Arc::clone(&self.table)
    }

    /// Runs one iteration of the supervisor loop: discover, classify,
    /// decide, apply. A no-op when the pause sentinel is present and
    /// unexpired.
    pub async fn tick(&self) -> Result<(), OrcError> {
        if pause::is_paused(&self.paths) {
            return Ok(());
        }

        let discovered = self.discover().await?;
        let now = Instant::now();

        let known_targets: Vec<PaneTarget> = self.table.lock().keys().cloned().collect();
        for stale in known_targets.iter().filter(|t| !discovered.contains_key(*t)) {
            self.table.lock().remove(stale);
        }

        for (target, role) in &discovered {
            let is_in_flight = self.in_flight.lock().contains(target);
            if is_in_flight {
                continue;
            }

            let tail = match self.adapter.capture_pane(target, TAIL_LINES).await {
                Ok(t) => t,
                Err(_) => continue, // transient read failure; retried next tick
            };

            let (prev_tail_hash, prev_state, ticks_unchanged) = {
                let table = self.table.lock();
                match table.get(target) {
                    Some(r) => (r.last_activity_hash, r.state, r.consecutive_idle_checks),
                    None => ([0u8; 16], PaneState::Starting, 0),
                }
            };

            // The classifier compares previous and current tail *text*, but
            // the record only retains a hash (§4.6's O(1)-memory
            // requirement). Reconstruct just enough text for the comparison
            // to come out right: identical text when the hash matches,
            // guaranteed-different text when it doesn't.
            let new_hash = orc_core::hash_tail(&tail);
            let unchanged = new_hash == prev_tail_hash;
            let prev_tail_arg = if unchanged {
                tail.clone()
            } else if tail.is_empty() {
                "\u{0}".to_string()
            } else {
                String::new()
            };
            let new_state = classify_pane(&prev_tail_arg, &tail, prev_state, ticks_unchanged);

            let record_snapshot = {
                let mut table = self.table.lock();
                let entry = table
                    .entry(target.clone())
                    .or_insert_with(|| AgentRecord::new(target.clone(), role.clone(), now));
                entry.consecutive_idle_checks = if unchanged { entry.consecutive_idle_checks.saturating_add(1) } else { 0 };
                entry.last_activity_hash = new_hash;
                entry.clone()
            };

            let decision = decide(&record_snapshot, new_state, now, self.backoff);
            self.apply(target, &decision).await;

            let mut table = self.table.lock();
            if let Some(entry) = table.get_mut(target) {
                entry.state = new_state;
                if !matches!(decision, RecoveryDecision::NoOp) {
                    entry.last_seen_change_at = now;
                }
                if matches!(decision, RecoveryDecision::Restart { .. } | RecoveryDecision::RespawnPm { .. }) {
                    let expired = entry.last_recovery_at.is_none_or(|t| now.saturating_duration_since(t) > self.backoff.window);
                    entry.recovery_attempts_in_window = if expired { 1 } else { entry.recovery_attempts_in_window + 1 };
                    entry.last_recovery_at = Some(now);
                }
            }
        }

        Ok(())
    }

    async fn discover(&self) -> Result<HashMap<PaneTarget, AgentRole>, OrcError> {
        let mut out = HashMap::new();
        let sessions = self.adapter.list_sessions().await.map_err(OrcError::from)?;
        for session in sessions {
            let windows = self.adapter.list_windows(&session.name).await.map_err(OrcError::from)?;
            for window in windows {
                if let Some(role) = AgentRole::from_window_name(&window.name) {
                    out.insert(PaneTarget::new(session.name.clone(), window.index), role);
                }
            }
        }
        Ok(out)
    }

    async fn apply(&self, target: &PaneTarget, decision: &RecoveryDecision) {
        self.in_flight.lock().insert(target.clone());
        match decision {
            RecoveryDecision::NoOp => {}
            RecoveryDecision::SendNudge { target, message } => {
                let plan = chunk_default(message);
                if let Err(e) = submit(&self.adapter, target, &plan, SubmitterConfig::default()).await {
                    tracing::warn!(%target, error = %e, "nudge delivery failed");
                }
            }
            RecoveryDecision::Restart { target } => {
                tracing::info!(%target, "restarting crashed/unresponsive agent");
                if let Err(e) = self.lifecycle.restart(target).await {
                    tracing::warn!(%target, error = %e, "restart failed");
                }
            }
            RecoveryDecision::RespawnPm { session } => {
                tracing::info!(%session, "respawning crashed PM");
                if let Some(existing) = self.table.lock().iter().find(|(t, r)| t.session == *session && matches!(r.role, AgentRole::Pm)).map(|(t, _)| t.clone())
                {
                    if let Err(e) = self.lifecycle.restart(&existing).await {
                        tracing::warn!(session = %session, error = %e, "PM respawn failed");
                    }
                }
            }
            RecoveryDecision::MarkMissing { target } => {
                self.table.lock().remove(target);
            }
        }
        self.in_flight.lock().remove(target);
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
