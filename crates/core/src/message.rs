// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Messaging and broadcast data types (spec §3).

use std::collections::BTreeSet;

use crate::pane_target::PaneTarget;

/// A single logical message, immutable once enqueued.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub target: PaneTarget,
    pub body: String,
    pub urgent: bool,
    pub correlation_id: String,
}

/// One chunk of a message, as produced by the Chunker (§4.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub total: usize,
    pub payload: String,
}

impl Chunk {
    /// The exact bytes sent to the pane: the pagination header (when
    /// `total > 1`) followed by the payload.
    pub fn rendered(&self) -> String {
        if self.total > 1 {
            format!("[{}/{}] {}", self.index, self.total, self.payload)
        } else {
            self.payload.clone()
        }
    }
}

/// Ordered list of chunks derived from one [`Message`] body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    pub chunks: Vec<Chunk>,
}

impl ChunkPlan {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Selects windows by name for broadcast exclusion (name or raw index).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum WindowSelector {
    Name(String),
    Index(u32),
}

/// A fan-out send to a subset of windows in one session (spec §4.7).
#[derive(Debug, Clone)]
pub struct BroadcastJob {
    pub session: String,
    pub body: String,
    pub role_filter: BTreeSet<String>,
    pub excludes: BTreeSet<WindowSelector>,
    pub correlation_id: String,
}

/// Outcome of delivering a [`BroadcastJob`] to one target window.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BroadcastResult {
    pub target: PaneTarget,
    pub window_name: String,
    pub delivered: bool,
    pub reason: Option<String>,
}

/// A pure decision value produced by the Supervisor's decision step (§4.6).
///
/// Intentionally carries no side effects — `apply()` in `orc-daemon`
/// interprets the value against the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryDecision {
    NoOp,
    SendNudge { target: PaneTarget, message: String },
    Restart { target: PaneTarget },
    RespawnPm { session: String },
    MarkMissing { target: PaneTarget },
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
