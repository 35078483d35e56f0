// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;
use std::time::{Duration, Instant};

use orc_adapters::session::FakeAdapter;
use orc_core::{AgentRecord, AgentRole, PaneState, PaneTarget, RecoveryDecision};

use super::*;

fn record(role: AgentRole, state: PaneState) -> AgentRecord {
    let mut r = AgentRecord::new(PaneTarget::new("demo", 1), role, Instant::now());
    r.state = state;
    r
}

#[test]
fn ready_and_busy_are_noop() {
    let now = Instant::now();
    let backoff = BackoffPolicy::default();
    assert_eq!(decide(&record(AgentRole::Pm, PaneState::Ready), PaneState::Ready, now, backoff), RecoveryDecision::NoOp);
    assert_eq!(decide(&record(AgentRole::Pm, PaneState::Busy), PaneState::Busy, now, backoff), RecoveryDecision::NoOp);
}

#[test]
fn first_transition_to_idle_sends_one_nudge_then_stops() {
    let now = Instant::now();
    let backoff = BackoffPolicy::default();
    let r = record(AgentRole::Worker("backend".into()), PaneState::Busy);
    let first = decide(&r, PaneState::Idle, now, backoff);
    assert!(matches!(first, RecoveryDecision::SendNudge { .. }));

    let still_idle = record(AgentRole::Worker("backend".into()), PaneState::Idle);
    assert_eq!(decide(&still_idle, PaneState::Idle, now, backoff), RecoveryDecision::NoOp);
}

#[test]
fn unresponsive_nudges_once_then_restarts() {
    let now = Instant::now();
    let backoff = BackoffPolicy::default();
    let r = record(AgentRole::Worker("backend".into()), PaneState::Idle);
    let first = decide(&r, PaneState::Unresponsive, now, backoff);
    assert!(matches!(first, RecoveryDecision::SendNudge { .. }));

    let already_unresponsive = record(AgentRole::Worker("backend".into()), PaneState::Unresponsive);
    let target = already_unresponsive.target.clone();
    assert_eq!(decide(&already_unresponsive, PaneState::Unresponsive, now, backoff), RecoveryDecision::Restart { target });
}

#[test]
fn crashed_pm_is_respawned_worker_is_restarted() {
    let now = Instant::now();
    let backoff = BackoffPolicy::default();
    let pm = record(AgentRole::Pm, PaneState::Busy);
    assert_eq!(decide(&pm, PaneState::Crashed, now, backoff), RecoveryDecision::RespawnPm { session: "demo".to_string() });

    let worker = record(AgentRole::Worker("backend".into()), PaneState::Busy);
    let target = worker.target.clone();
    assert_eq!(decide(&worker, PaneState::Crashed, now, backoff), RecoveryDecision::Restart { target });
}

#[test]
fn gone_marks_missing() {
    let now = Instant::now();
    let backoff = BackoffPolicy::default();
    let r = record(AgentRole::Worker("backend".into()), PaneState::Busy);
    let target = r.target.clone();
    assert_eq!(decide(&r, PaneState::Gone, now, backoff), RecoveryDecision::MarkMissing { target });
}

#[test]
fn crash_loop_backoff_suppresses_recovery_after_max_attempts() {
    let now = Instant::now();
    let backoff = BackoffPolicy { max_attempts: 2, window: Duration::from_secs(60) };
    let mut r = record(AgentRole::Worker("backend".into()), PaneState::Busy);
    r.recovery_attempts_in_window = 2;
    r.last_recovery_at = Some(now);

    assert_eq!(decide(&r, PaneState::Crashed, now, backoff), RecoveryDecision::NoOp);
}

#[test]
fn crash_loop_backoff_resets_after_window_expires() {
    let now = Instant::now();
    let backoff = BackoffPolicy { max_attempts: 2, window: Duration::from_secs(60) };
    let mut r = record(AgentRole::Worker("backend".into()), PaneState::Busy);
    r.recovery_attempts_in_window = 2;
    r.last_recovery_at = Some(now - Duration::from_secs(120));

    let target = r.target.clone();
    assert_eq!(decide(&r, PaneState::Crashed, now, backoff), RecoveryDecision::Restart { target });
}

#[tokio::test]
async fn tick_discovers_agent_windows_and_populates_the_table() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = FakeAdapter::new();
    adapter.create_session("demo", "shell", Path::new("/tmp")).await.unwrap();
    adapter.create_window("demo", "Claude-pm", Path::new("/tmp")).await.unwrap();
    adapter.push_capture("> ready");

    let sup = Supervisor::new(adapter, Paths::new(dir.path()), BackoffPolicy::default());
    sup.tick().await.unwrap();

    let table = sup.table();
    let snapshot = table.lock();
    assert_eq!(snapshot.len(), 1);
    let record = snapshot.values().next().unwrap();
    assert_eq!(record.role, AgentRole::Pm);
}

#[tokio::test]
async fn tick_is_noop_while_paused() {
    let dir = tempfile::tempdir().unwrap();
    let paths = Paths::new(dir.path());
    paths.ensure_dirs().unwrap();
    pause::pause_for(&paths, Duration::from_secs(60)).unwrap();

    let adapter = FakeAdapter::new();
    adapter.create_session("demo", "shell", Path::new("/tmp")).await.unwrap();
    adapter.create_window("demo", "Claude-pm", Path::new("/tmp")).await.unwrap();

    let sup = Supervisor::new(adapter, paths, BackoffPolicy::default());
    sup.tick().await.unwrap();

    assert!(sup.table().lock().is_empty());
}

#[tokio::test]
async fn tick_drops_agents_whose_window_disappeared() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = FakeAdapter::new();
    adapter.create_session("demo", "shell", Path::new("/tmp")).await.unwrap();
    let idx = adapter.create_window("demo", "Claude-pm", Path::new("/tmp")).await.unwrap();
    adapter.push_capture("> ready");

    let sup = Supervisor::new(adapter.clone(), Paths::new(dir.path()), BackoffPolicy::default());
    sup.tick().await.unwrap();
    assert_eq!(sup.table().lock().len(), 1);

    adapter.kill_window(&PaneTarget::new("demo", idx)).await.unwrap();
    sup.tick().await.unwrap();
    assert!(sup.table().lock().is_empty());
}
