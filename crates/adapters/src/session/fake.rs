// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fake multiplexer adapter for tests: records calls, lets tests
//! script session/window state and pane-capture sequences without a real
//! `tmux` binary.
#![cfg_attr(coverage_nightly, coverage(off))]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use orc_core::PaneTarget;

use super::{SessionAdapter, SessionError, SessionInfo, WindowInfo};

/// One recorded call against a [`FakeAdapter`], for assertion in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    ListSessions,
    ListWindows { session: String },
    HasSession { session: String },
    CreateSession { session: String, first_window_name: String, cwd: PathBuf },
    CreateWindow { session: String, name: String, cwd: PathBuf },
    KillWindow { target: PaneTarget },
    KillSession { session: String },
    CapturePane { target: PaneTarget, tail_lines: u32 },
    SendKeys { target: PaneTarget, keys: String, literal: bool },
    SetPasteBuffer { text: String },
    PasteBuffer { target: PaneTarget },
}

#[derive(Default)]
struct Window {
    name: String,
}

#[derive(Default)]
struct Session {
    windows: Vec<(u32, Window)>,
    next_index: u32,
    created_at: u64,
}

#[derive(Default)]
struct Inner {
    sessions: std::collections::HashMap<String, Session>,
    calls: Vec<FakeCall>,
    /// Queued capture-pane responses, popped front-first. When empty,
    /// `capture_pane` returns an empty string.
    captures: VecDeque<String>,
    paste_buffer: String,
    /// Targets for which every operation should fail with `NotFound`.
    missing: std::collections::HashSet<PaneTarget>,
}

/// Test double for [`SessionAdapter`], grounded on the teacher's
/// call-recording fake adapter idiom.
#[derive(Clone, Default)]
pub struct FakeAdapter {
    inner: Arc<Mutex<Inner>>,
}

impl FakeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.inner.lock().calls.clone()
    }

    /// Queues a pane-capture response; the next N `capture_pane` calls for
    /// any target return these texts in order.
    pub fn push_capture(&self, text: impl Into<String>) {
        self.inner.lock().captures.push_back(text.into());
    }

    /// Marks `target` as already-gone: every operation against it fails
    /// with `NotFound`, simulating a window-killer race.
    pub fn mark_missing(&self, target: PaneTarget) {
        self.inner.lock().missing.insert(target);
    }

    pub fn paste_buffer_contents(&self) -> String {
        self.inner.lock().paste_buffer.clone()
    }

    fn check_missing(&self, target: &PaneTarget) -> Result<(), SessionError> {
        if self.inner.lock().missing.contains(target) {
            return Err(SessionError::NotFound(target.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionAdapter for FakeAdapter {
    async fn list_sessions(&self) -> Result<Vec<SessionInfo>, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(FakeCall::ListSessions);
        Ok(inner
            .sessions
            .iter()
            .map(|(name, s)| SessionInfo { name: name.clone(), created_at: s.created_at, attached: false })
            .collect())
    }

    async fn list_windows(&self, session: &str) -> Result<Vec<WindowInfo>, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(FakeCall::ListWindows { session: session.to_string() });
        let s = inner.sessions.get(session).ok_or_else(|| SessionError::NotFound(session.to_string()))?;
        Ok(s.windows.iter().map(|(index, w)| WindowInfo { index: *index, name: w.name.clone() }).collect())
    }

    async fn has_session(&self, session: &str) -> Result<bool, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(FakeCall::HasSession { session: session.to_string() });
        Ok(inner.sessions.contains_key(session))
    }

    async fn create_session(&self, session: &str, first_window_name: &str, cwd: &Path) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(FakeCall::CreateSession {
            session: session.to_string(),
            first_window_name: first_window_name.to_string(),
            cwd: cwd.to_path_buf(),
        });
        let entry = inner.sessions.entry(session.to_string()).or_default();
        entry.windows.push((entry.next_index, Window { name: first_window_name.to_string() }));
        entry.next_index += 1;
        Ok(())
    }

    async fn create_window(&self, session: &str, name: &str, cwd: &Path) -> Result<u32, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(FakeCall::CreateWindow { session: session.to_string(), name: name.to_string(), cwd: cwd.to_path_buf() });
        let entry = inner.sessions.get_mut(session).ok_or_else(|| SessionError::NotFound(session.to_string()))?;
        let index = entry.next_index;
        entry.windows.push((index, Window { name: name.to_string() }));
        entry.next_index += 1;
        Ok(index)
    }

    async fn kill_window(&self, target: &PaneTarget) -> Result<(), SessionError> {
        self.check_missing(target)?;
        let mut inner = self.inner.lock();
        inner.calls.push(FakeCall::KillWindow { target: target.clone() });
        if let Some(s) = inner.sessions.get_mut(&target.session) {
            s.windows.retain(|(i, _)| *i != target.window);
        }
        Ok(())
    }

    async fn kill_session(&self, session: &str) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(FakeCall::KillSession { session: session.to_string() });
        inner.sessions.remove(session);
        Ok(())
    }

    async fn capture_pane(&self, target: &PaneTarget, tail_lines: u32) -> Result<String, SessionError> {
        self.check_missing(target)?;
        let mut inner = self.inner.lock();
        inner.calls.push(FakeCall::CapturePane { target: target.clone(), tail_lines });
        Ok(inner.captures.pop_front().unwrap_or_default())
    }

    async fn send_keys(&self, target: &PaneTarget, keys: &str, literal: bool) -> Result<(), SessionError> {
        self.check_missing(target)?;
        self.inner.lock().calls.push(FakeCall::SendKeys { target: target.clone(), keys: keys.to_string(), literal });
        Ok(())
    }

    async fn set_paste_buffer(&self, text: &str) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(FakeCall::SetPasteBuffer { text: text.to_string() });
        inner.paste_buffer = text.to_string();
        Ok(())
    }

    async fn paste_buffer(&self, target: &PaneTarget) -> Result<(), SessionError> {
        self.check_missing(target)?;
        self.inner.lock().calls.push(FakeCall::PasteBuffer { target: target.clone() });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
