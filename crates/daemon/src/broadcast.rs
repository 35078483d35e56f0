// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Broadcast Coordinator (spec §4.7): fan a single message body out to a
//! filtered subset of a session's agent windows.
//!
//! Grounded on
//! `original_source/tmux_orchestrator/core/team_operations/broadcast_to_team.py`:
//! verify the session exists, collect agent windows, send to each, and
//! report a per-target success tally. Filtering by role and exclusion list
//! is this crate's addition over the original's "every Claude/pm window".

use orc_adapters::session::SessionAdapter;
use orc_core::{AgentRole, BroadcastJob, BroadcastResult, OrcError, PaneTarget, WindowSelector};
use orc_messaging::{chunk_default, submit, SubmitterConfig};

pub struct BroadcastCoordinator<A: SessionAdapter> {
    adapter: A,
}

impl<A: SessionAdapter> BroadcastCoordinator<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    /// Delivers `job` to every window that survives its role filter and
    /// exclusion list, sequentially. Fails fast with `NotFound` if no
    /// window in the session qualifies as a target.
    pub async fn broadcast(&self, job: &BroadcastJob) -> Result<Vec<BroadcastResult>, OrcError> {
        if !self.adapter.has_session(&job.session).await.map_err(OrcError::from)? {
            return Err(OrcError::NotFound(format!("session {} not found", job.session)));
        }

        let windows = self.adapter.list_windows(&job.session).await.map_err(OrcError::from)?;
        let targets: Vec<(PaneTarget, String)> = windows
            .into_iter()
            .filter_map(|w| {
                let role = AgentRole::from_window_name(&w.name)?;
                let excluded = job.excludes.contains(&WindowSelector::Index(w.index))
                    || job.excludes.contains(&WindowSelector::Name(w.name.clone()));
                if excluded {
                    return None;
                }
                if !job.role_filter.is_empty()
                    && !job.role_filter.iter().any(|r| r.eq_ignore_ascii_case(role.role_str()))
                {
                    return None;
                }
                Some((PaneTarget::new(job.session.clone(), w.index), w.name))
            })
            .collect();

        if targets.is_empty() {
            return Err(OrcError::NotFound(format!("no broadcast targets in session {}", job.session)));
        }

        let plan = chunk_default(&job.body);
        let mut results = Vec::with_capacity(targets.len());
        for (target, window_name) in targets {
            let outcome = submit(&self.adapter, &target, &plan, SubmitterConfig::default()).await;
            results.push(BroadcastResult {
                target,
                window_name,
                delivered: outcome.is_ok(),
                reason: outcome.err().map(|e| e.to_string()),
            });
        }

        Ok(results)
    }
}

/// Human-readable tally matching the original's
/// `"Broadcast complete: N/M agents reached"`, plus up to three failure
/// reasons inline and a "+N more" tail for the rest.
pub fn summarize(results: &[BroadcastResult]) -> String {
    let total = results.len();
    let delivered = results.iter().filter(|r| r.delivered).count();
    let mut summary = format!("Broadcast complete: {delivered}/{total} agents reached");

    let failures: Vec<&BroadcastResult> = results.iter().filter(|r| !r.delivered).collect();
    if !failures.is_empty() {
        let shown: Vec<String> = failures
            .iter()
            .take(3)
            .map(|r| format!("{} ({})", r.window_name, r.reason.as_deref().unwrap_or("unknown")))
            .collect();
        summary.push_str(" — failed: ");
        summary.push_str(&shown.join(", "));
        if failures.len() > 3 {
            summary.push_str(&format!(", +{} more", failures.len() - 3));
        }
    }

    summary
}

#[cfg(test)]
#[path = "broadcast_tests.rs"]
mod tests;
