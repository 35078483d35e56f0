// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure pane-liveness classification (spec §4.2).
//!
//! Grounded on the original monitor's `_is_claude_ready` readiness-indicator
//! list and on the debounced-confirmation shape of an idle grace timer: the
//! classifier never looks at wall-clock time itself, only at the elapsed
//! duration and tick counts handed to it by the caller.

use sha2::{Digest, Sha256};

use crate::agent::PaneState;

/// Readiness indicators: presence of any means the UI is at least `Ready`.
const READINESS_INDICATORS: &[&str] = &["> ", "│ >", "Type a message", "Claude"];

/// Structural evidence required before the word "error" in pane output is
/// treated as a crash signal — agent-authored prose saying "error" must not
/// trip recovery.
const ERROR_STRUCTURAL_MARKERS: &[&str] =
    &["Traceback (most recent call last)", "Fatal error:", "panic:", "Segmentation fault", "command not found"];

/// Number of consecutive unchanged ticks before a ready pane is considered idle.
pub const IDLE_TICKS: u32 = 3;

/// Number of consecutive unchanged ticks (> `IDLE_TICKS`) before a
/// non-ready pane is considered unresponsive / crashed.
pub const UNRESPONSIVE_TICKS: u32 = 6;

/// Sixteen-byte digest of a pane tail, used to detect change without storing
/// the full text (§4.6: memory must be O(#agents), not O(#agents × bytes)).
pub fn hash_tail(tail: &str) -> [u8; 16] {
    let digest = Sha256::digest(tail.as_bytes());
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest[..16]);
    out
}

/// True if `tail` contains any readiness indicator — the UI is at least
/// `Ready`. Exposed for callers (the Submitter, §4.4) that need a readiness
/// check without running the full state machine.
pub fn has_readiness_indicator(tail: &str) -> bool {
    READINESS_INDICATORS.iter().any(|ind| tail.contains(ind))
}

/// Shell prompt pattern: a bare `$ ` or `# ` at the start of the last
/// non-empty line, with no readiness indicator on that same line.
fn last_line_is_shell_prompt(tail: &str) -> bool {
    let Some(last) = tail.lines().rev().find(|l| !l.trim().is_empty()) else {
        return false;
    };
    let trimmed = last.trim_start();
    (trimmed.starts_with("$ ") || trimmed.starts_with("# ")) && !has_readiness_indicator(last)
}

fn has_structural_error(tail: &str) -> bool {
    ERROR_STRUCTURAL_MARKERS.iter().any(|m| tail.contains(m))
}

/// Classifies a pane's liveness from its captured tail and timing history.
///
/// `ticks_unchanged` is the number of consecutive ticks (including this one,
/// if `new_tail`'s hash equals the hash implied by `prev_tail`) for which the
/// tail has not changed; callers own incrementing/resetting this counter
/// alongside `last_seen_change_at`, matching [`crate::agent::AgentRecord`].
pub fn classify(prev_tail: &str, new_tail: &str, prev_state: PaneState, ticks_unchanged: u32) -> PaneState {
    let changed = hash_tail(prev_tail) != hash_tail(new_tail);
    let ticks_unchanged = if changed { 0 } else { ticks_unchanged };

    let was_live_ui = matches!(prev_state, PaneState::Ready | PaneState::Busy | PaneState::Idle);
    if was_live_ui && last_line_is_shell_prompt(new_tail) {
        return PaneState::Crashed;
    }

    if has_structural_error(new_tail) {
        return PaneState::Crashed;
    }

    let ready = has_readiness_indicator(new_tail);

    if changed {
        return if ready { PaneState::Busy } else { PaneState::Starting };
    }

    if ready {
        if ticks_unchanged >= IDLE_TICKS {
            return PaneState::Idle;
        }
        return PaneState::Busy;
    }

    if ticks_unchanged >= UNRESPONSIVE_TICKS {
        return if new_tail.trim().is_empty() { PaneState::Unresponsive } else { PaneState::Crashed };
    }

    prev_state
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
