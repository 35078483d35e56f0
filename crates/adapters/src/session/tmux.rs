// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tmux-backed multiplexer adapter: every call is a fresh `tmux` subprocess.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use orc_core::PaneTarget;

use super::{SessionAdapter, SessionError, SessionInfo, WindowInfo};
use crate::subprocess::{run_with_timeout, TMUX_TIMEOUT};

/// Real `tmux` binary adapter.
#[derive(Clone, Default)]
pub struct TmuxAdapter;

impl TmuxAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn pane_id(target: &PaneTarget) -> String {
    format!("{}:{}", target.session, target.window)
}

/// Classifies a failed tmux invocation's stderr as `NotFound` vs
/// `TransportError`, per spec §4.1.
fn classify_failure(stderr: &str) -> SessionError {
    let lower = stderr.to_lowercase();
    if lower.contains("can't find") || lower.contains("session not found") || lower.contains("no such") {
        SessionError::NotFound(stderr.trim().to_string())
    } else {
        SessionError::TransportError(stderr.trim().to_string())
    }
}

async fn run(cmd: Command, description: &str) -> Result<std::process::Output, SessionError> {
    run_with_timeout(cmd, TMUX_TIMEOUT, description)
        .await
        .map_err(SessionError::TransportError)
}

#[async_trait]
impl SessionAdapter for TmuxAdapter {
    async fn list_sessions(&self) -> Result<Vec<SessionInfo>, SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["list-sessions", "-F", "#{session_name}\t#{session_created}\t#{session_attached}"]);
        let output = run(cmd, "tmux list-sessions").await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // No sessions at all is reported as an error by tmux; treat as empty.
            if stderr.to_lowercase().contains("no server running") || stderr.to_lowercase().contains("no sessions") {
                return Ok(Vec::new());
            }
            return Err(classify_failure(&stderr));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(text
            .lines()
            .filter_map(|line| {
                let mut parts = line.splitn(3, '\t');
                let name = parts.next()?.to_string();
                let created_at = parts.next()?.parse().unwrap_or(0);
                let attached = parts.next()? == "1";
                Some(SessionInfo { name, created_at, attached })
            })
            .collect())
    }

    async fn list_windows(&self, session: &str) -> Result<Vec<WindowInfo>, SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["list-windows", "-t", session, "-F", "#{window_index}\t#{window_name}"]);
        let output = run(cmd, "tmux list-windows").await?;

        if !output.status.success() {
            return Err(classify_failure(&String::from_utf8_lossy(&output.stderr)));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(text
            .lines()
            .filter_map(|line| {
                let (index, name) = line.split_once('\t')?;
                Some(WindowInfo { index: index.parse().ok()?, name: name.to_string() })
            })
            .collect())
    }

    async fn has_session(&self, session: &str) -> Result<bool, SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["has-session", "-t", session]);
        let output = run(cmd, "tmux has-session").await?;
        Ok(output.status.success())
    }

    async fn create_session(&self, session: &str, first_window_name: &str, cwd: &Path) -> Result<(), SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["new-session", "-d", "-s", session, "-n", first_window_name, "-c"]).arg(cwd);
        let output = run(cmd, "tmux new-session").await?;

        if !output.status.success() {
            return Err(classify_failure(&String::from_utf8_lossy(&output.stderr)));
        }
        Ok(())
    }

    async fn create_window(&self, session: &str, name: &str, cwd: &Path) -> Result<u32, SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["new-window", "-t", session, "-n", name, "-c"]).arg(cwd);
        let output = run(cmd, "tmux new-window").await?;

        if !output.status.success() {
            return Err(classify_failure(&String::from_utf8_lossy(&output.stderr)));
        }

        self.resolve_window(session, name).await
    }

    async fn kill_window(&self, target: &PaneTarget) -> Result<(), SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["kill-window", "-t", &pane_id(target)]);
        let output = run(cmd, "tmux kill-window").await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // Killing an already-gone window is idempotent, per spec §4.1.
            if matches!(classify_failure(&stderr), SessionError::NotFound(_)) {
                return Ok(());
            }
            return Err(classify_failure(&stderr));
        }
        Ok(())
    }

    async fn kill_session(&self, session: &str) -> Result<(), SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["kill-session", "-t", session]);
        let output = run(cmd, "tmux kill-session").await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if matches!(classify_failure(&stderr), SessionError::NotFound(_)) {
                return Ok(());
            }
            return Err(classify_failure(&stderr));
        }
        Ok(())
    }

    async fn capture_pane(&self, target: &PaneTarget, tail_lines: u32) -> Result<String, SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["capture-pane", "-t", &pane_id(target), "-p", "-S", &format!("-{}", tail_lines)]);
        let output = run(cmd, "tmux capture-pane").await?;

        if !output.status.success() {
            return Err(classify_failure(&String::from_utf8_lossy(&output.stderr)));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    async fn send_keys(&self, target: &PaneTarget, keys: &str, literal: bool) -> Result<(), SessionError> {
        let mut cmd = Command::new("tmux");
        if literal {
            cmd.args(["send-keys", "-t", &pane_id(target), "-l", "--", keys]);
        } else {
            cmd.args(["send-keys", "-t", &pane_id(target), keys]);
        }
        let output = run(cmd, "tmux send-keys").await?;

        if !output.status.success() {
            return Err(classify_failure(&String::from_utf8_lossy(&output.stderr)));
        }
        Ok(())
    }

    async fn set_paste_buffer(&self, text: &str) -> Result<(), SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["set-buffer", "--", text]);
        let output = run(cmd, "tmux set-buffer").await?;

        if !output.status.success() {
            return Err(classify_failure(&String::from_utf8_lossy(&output.stderr)));
        }
        Ok(())
    }

    async fn paste_buffer(&self, target: &PaneTarget) -> Result<(), SessionError> {
        let mut cmd = Command::new("tmux");
        cmd.args(["paste-buffer", "-t", &pane_id(target)]);
        let output = run(cmd, "tmux paste-buffer").await?;

        if !output.status.success() {
            return Err(classify_failure(&String::from_utf8_lossy(&output.stderr)));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tmux_tests.rs"]
mod tests;
