// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op multiplexer adapter, used for dry-run CLI invocations.

use std::path::Path;

use async_trait::async_trait;

use orc_core::PaneTarget;

use super::{SessionAdapter, SessionError, SessionInfo, WindowInfo};

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopAdapter;

impl NoopAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionAdapter for NoopAdapter {
    async fn list_sessions(&self) -> Result<Vec<SessionInfo>, SessionError> {
        Ok(Vec::new())
    }

    async fn list_windows(&self, _session: &str) -> Result<Vec<WindowInfo>, SessionError> {
        Ok(Vec::new())
    }

    async fn has_session(&self, _session: &str) -> Result<bool, SessionError> {
        Ok(false)
    }

    async fn create_session(&self, _session: &str, _first_window_name: &str, _cwd: &Path) -> Result<(), SessionError> {
        Ok(())
    }

    async fn create_window(&self, _session: &str, _name: &str, _cwd: &Path) -> Result<u32, SessionError> {
        Ok(0)
    }

    async fn kill_window(&self, _target: &PaneTarget) -> Result<(), SessionError> {
        Ok(())
    }

    async fn kill_session(&self, _session: &str) -> Result<(), SessionError> {
        Ok(())
    }

    async fn capture_pane(&self, _target: &PaneTarget, _tail_lines: u32) -> Result<String, SessionError> {
        Ok(String::new())
    }

    async fn send_keys(&self, _target: &PaneTarget, _keys: &str, _literal: bool) -> Result<(), SessionError> {
        Ok(())
    }

    async fn set_paste_buffer(&self, _text: &str) -> Result<(), SessionError> {
        Ok(())
    }

    async fn paste_buffer(&self, _target: &PaneTarget) -> Result<(), SessionError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
