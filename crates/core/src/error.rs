// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crate-wide error taxonomy shared by every component.

use thiserror::Error;

/// Closed error set for the orchestrator's core operations.
///
/// Maps onto the CLI's `error_type` field and process exit codes: `NotFound`,
/// `BadArgument`, and `Timeout` exit `2` (caller mistake); everything else
/// exits `1` (runtime failure).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrcError {
    #[error("pane not found: {0}")]
    NotFound(String),

    #[error("daemon already running (pid {pid})")]
    AlreadyRunning { pid: u32 },

    #[error("pane not ready: {0}")]
    NotReady(String),

    #[error("submission failed for chunk {chunk_index}, tried: {methods_tried:?}")]
    SubmissionFailed { chunk_index: usize, methods_tried: Vec<String> },

    #[error("transport error: {0}")]
    TransportError(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("bad argument: {0}")]
    BadArgument(String),

    #[error("timed out: {0}")]
    Timeout(String),
}

impl OrcError {
    /// Machine-readable error code, carried in the CLI's JSON envelope.
    pub fn error_type(&self) -> &'static str {
        match self {
            OrcError::NotFound(_) => "not_found",
            OrcError::AlreadyRunning { .. } => "already_running",
            OrcError::NotReady(_) => "not_ready",
            OrcError::SubmissionFailed { .. } => "submission_failed",
            OrcError::TransportError(_) => "transport_error",
            OrcError::RateLimited(_) => "rate_limited",
            OrcError::BadArgument(_) => "bad_argument",
            OrcError::Timeout(_) => "timeout",
        }
    }

    /// Process exit code per spec.md §6: `2` for caller mistakes, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            OrcError::BadArgument(_) | OrcError::NotFound(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
