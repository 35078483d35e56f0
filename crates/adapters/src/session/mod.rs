// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multiplexer Adapter (spec §4.1): a narrow, synchronous interface over the
//! external multiplexer binary. Every operation is a fresh process
//! invocation; no long-lived control channel is kept.

mod noop;
mod tmux;

pub use noop::NoopAdapter;
pub use tmux::TmuxAdapter;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeAdapter, FakeCall};

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use orc_core::{OrcError, PaneTarget};

/// Errors from multiplexer operations (spec §4.1's failure model).
///
/// `NotFound` is authoritative (session/window gone); `TransportError` is
/// retried by the caller with caps. No other kinds exist — every adapter
/// method collapses its failure modes into one of these two.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transport error: {0}")]
    TransportError(String),
}

impl From<SessionError> for OrcError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotFound(s) => OrcError::NotFound(s),
            SessionError::TransportError(s) => OrcError::TransportError(s),
        }
    }
}

/// One multiplexer session as reported by `list_sessions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub name: String,
    pub created_at: u64,
    pub attached: bool,
}

/// One window inside a session as reported by `list_windows`.
///
/// Indices may be sparse and may be renumbered when sibling windows close;
/// callers that need a stable handle re-resolve by name via
/// [`SessionAdapter::resolve_window`] before each write (spec §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub index: u32,
    pub name: String,
}

/// Thin wrapper over the multiplexer binary (spec §4.1).
#[async_trait]
pub trait SessionAdapter: Clone + Send + Sync + 'static {
    async fn list_sessions(&self) -> Result<Vec<SessionInfo>, SessionError>;

    /// Enumerated in current order; indices may be sparse.
    async fn list_windows(&self, session: &str) -> Result<Vec<WindowInfo>, SessionError>;

    async fn has_session(&self, session: &str) -> Result<bool, SessionError>;

    async fn create_session(
        &self,
        session: &str,
        first_window_name: &str,
        cwd: &Path,
    ) -> Result<(), SessionError>;

    /// Appends a new window at the end of `session` and returns its resolved
    /// index (looked up by `name` after creation, per spec §4.1).
    async fn create_window(&self, session: &str, name: &str, cwd: &Path) -> Result<u32, SessionError>;

    async fn kill_window(&self, target: &PaneTarget) -> Result<(), SessionError>;

    async fn kill_session(&self, session: &str) -> Result<(), SessionError>;

    /// Reads the visible plus scrollback tail. Must not block waiting for
    /// new output.
    async fn capture_pane(&self, target: &PaneTarget, tail_lines: u32) -> Result<String, SessionError>;

    /// `literal = true`: characters are written as data, bypassing key-table
    /// interpretation. `literal = false`: `keys` is a token like `Enter`,
    /// `C-c`, `C-u`, `Escape`, interpreted as a control sequence.
    async fn send_keys(&self, target: &PaneTarget, keys: &str, literal: bool) -> Result<(), SessionError>;

    async fn set_paste_buffer(&self, text: &str) -> Result<(), SessionError>;

    async fn paste_buffer(&self, target: &PaneTarget) -> Result<(), SessionError>;

    /// Resolves `name`'s current window index within `session`, tolerating
    /// renumbering. Used by callers (the Lifecycle Controller, primarily)
    /// immediately before a write against a [`PaneTarget`] they didn't just
    /// create themselves.
    async fn resolve_window(&self, session: &str, name: &str) -> Result<u32, SessionError> {
        let windows = self.list_windows(session).await?;
        windows
            .into_iter()
            .find(|w| w.name == name)
            .map(|w| w.index)
            .ok_or_else(|| SessionError::NotFound(format!("{}:{}", session, name)))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
