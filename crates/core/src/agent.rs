// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The in-memory agent record owned exclusively by the Supervisor.

use std::time::{Duration, Instant};

use crate::pane_target::PaneTarget;

/// Role of an agent, derived from its window-name prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AgentRole {
    Orchestrator,
    Pm,
    Worker(String),
}

impl AgentRole {
    /// Parses a window name of the form `Claude-<role>` into a role, or
    /// returns `None` if the name doesn't match the agent-window pattern.
    pub fn from_window_name(name: &str) -> Option<Self> {
        let suffix = name.strip_prefix("Claude-")?;
        Some(match suffix {
            "orchestrator" => AgentRole::Orchestrator,
            "pm" => AgentRole::Pm,
            other => AgentRole::Worker(other.to_string()),
        })
    }

    /// Renders the canonical window name for this role, e.g. `Claude-pm`.
    pub fn window_name(&self) -> String {
        match self {
            AgentRole::Orchestrator => "Claude-orchestrator".to_string(),
            AgentRole::Pm => "Claude-pm".to_string(),
            AgentRole::Worker(role) => format!("Claude-{}", role),
        }
    }

    /// The bare role string used for broadcast role filters (`"pm"`, `"frontend"`, ...).
    pub fn role_str(&self) -> &str {
        match self {
            AgentRole::Orchestrator => "orchestrator",
            AgentRole::Pm => "pm",
            AgentRole::Worker(role) => role,
        }
    }
}

/// Liveness classification of a pane, per spec §4.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PaneState {
    Starting,
    Ready,
    Busy,
    Idle,
    Unresponsive,
    Crashed,
    Gone,
}

/// The in-memory record the Supervisor maintains for one pane.
///
/// At most one record exists per [`PaneTarget`] at any time; the Supervisor
/// is the sole writer (§3, §4.6).
#[derive(Debug, Clone)]
pub struct AgentRecord {
    pub target: PaneTarget,
    pub role: AgentRole,
    pub state: PaneState,
    pub last_seen_change_at: Instant,
    pub last_activity_hash: [u8; 16],
    pub consecutive_idle_checks: u32,
    pub recovery_attempts_in_window: u32,
    pub last_recovery_at: Option<Instant>,
}

impl AgentRecord {
    pub fn new(target: PaneTarget, role: AgentRole, now: Instant) -> Self {
        Self {
            target,
            role,
            state: PaneState::Starting,
            last_seen_change_at: now,
            last_activity_hash: [0u8; 16],
            consecutive_idle_checks: 0,
            recovery_attempts_in_window: 0,
            last_recovery_at: None,
        }
    }

    pub fn elapsed_since_change(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_seen_change_at)
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
