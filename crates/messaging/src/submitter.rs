// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submitter (spec §4.4): delivers a [`ChunkPlan`] to one pane and verifies
//! each chunk actually left the agent's input buffer, trying a sequence of
//! submission methods before giving up.
//!
//! Grounded on `original_source/tmux_orchestrator/utils/claude_interface.py`'s
//! `ClaudeInterface`: readiness check, input clear, then a per-chunk
//! submit-and-verify loop. The output shape — a byte payload plus a delay —
//! mirrors the `NudgeStep` encoding used elsewhere in the corpus for driving
//! an interactive agent's input box.

use std::time::Duration;

use orc_core::{has_readiness_indicator, ChunkPlan, OrcError, PaneTarget};
use orc_adapters::session::{SessionAdapter, SessionError};

/// Tail length (lines) captured for readiness checks and submission
/// verification, matching the classifier's "≤ ~100 lines" budget (§4.2).
pub const CAPTURE_TAIL_LINES: u32 = 100;

/// The control sequence interpreted by the target agent's input box as
/// "submit", tried after every chunk submission attempt.
const SUBMIT_KEY: &str = "C-Enter";

/// Spacing between each key in the input-clear sequence.
const CLEAR_KEY_SPACING: Duration = Duration::from_millis(200);

/// Settle delay before capturing the pane to verify a submission attempt.
const VERIFY_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Delay between chunks of a multi-chunk plan.
const DEFAULT_INTER_CHUNK_DELAY: Duration = Duration::from_millis(200);

/// Submission methods tried in order for each chunk (spec §4.4 step 3a).
/// The source's fifth "escape sequence" fallback is dropped as redundant
/// with `TrailingNewline` — see DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmitMethod {
    Standard,
    PasteBuffer,
    LiteralKeys,
    TrailingNewline,
}

const METHODS: [SubmitMethod; 4] =
    [SubmitMethod::Standard, SubmitMethod::PasteBuffer, SubmitMethod::LiteralKeys, SubmitMethod::TrailingNewline];

impl SubmitMethod {
    fn name(self) -> &'static str {
        match self {
            SubmitMethod::Standard => "standard",
            SubmitMethod::PasteBuffer => "paste_buffer",
            SubmitMethod::LiteralKeys => "literal_keys",
            SubmitMethod::TrailingNewline => "trailing_newline",
        }
    }
}

/// Tunable delays for the Submitter; defaults match spec §4.4.
#[derive(Debug, Clone, Copy)]
pub struct SubmitterConfig {
    pub clear_key_spacing: Duration,
    pub verify_settle_delay: Duration,
    pub inter_chunk_delay: Duration,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            clear_key_spacing: CLEAR_KEY_SPACING,
            verify_settle_delay: VERIFY_SETTLE_DELAY,
            inter_chunk_delay: DEFAULT_INTER_CHUNK_DELAY,
        }
    }
}

/// Delivers `plan` to `target` and verifies submission, per spec §4.4.
pub async fn submit<A: SessionAdapter>(
    adapter: &A,
    target: &PaneTarget,
    plan: &ChunkPlan,
    config: SubmitterConfig,
) -> Result<(), OrcError> {
    let tail = adapter.capture_pane(target, CAPTURE_TAIL_LINES).await.map_err(OrcError::from)?;
    if !has_readiness_indicator(&tail) {
        return Err(OrcError::NotReady(target.to_string()));
    }

    clear_input(adapter, target, &config).await?;

    let mut prior_tail = tail;
    for (i, chunk) in plan.chunks.iter().enumerate() {
        let rendered = chunk.rendered();
        match try_submit_chunk(adapter, target, &rendered, &prior_tail, &config).await {
            Ok(new_tail) => {
                prior_tail = new_tail;
                if i + 1 < plan.chunks.len() {
                    tokio::time::sleep(config.inter_chunk_delay).await;
                }
            }
            Err(methods_tried) => {
                return Err(OrcError::SubmissionFailed { chunk_index: i, methods_tried });
            }
        }
    }
    Ok(())
}

async fn clear_input<A: SessionAdapter>(adapter: &A, target: &PaneTarget, config: &SubmitterConfig) -> Result<(), OrcError> {
    for key in ["C-c", "C-u", "Escape", "C-a", "C-k"] {
        adapter.send_keys(target, key, false).await.map_err(OrcError::from)?;
        tokio::time::sleep(config.clear_key_spacing).await;
    }
    Ok(())
}

/// Tries each submission method in order, returning the post-submit tail on
/// success or the list of method names tried on exhaustion.
async fn try_submit_chunk<A: SessionAdapter>(
    adapter: &A,
    target: &PaneTarget,
    rendered: &str,
    before_tail: &str,
    config: &SubmitterConfig,
) -> Result<String, Vec<String>> {
    let mut tried = Vec::new();
    for method in METHODS {
        tried.push(method.name().to_string());
        if apply_method(adapter, target, rendered, method).await.is_err() {
            continue;
        }
        tokio::time::sleep(config.verify_settle_delay).await;
        let Ok(after_tail) = adapter.capture_pane(target, CAPTURE_TAIL_LINES).await else {
            continue;
        };
        if verify_submitted(before_tail, &after_tail, rendered) {
            return Ok(after_tail);
        }
    }
    Err(tried)
}

async fn apply_method<A: SessionAdapter>(
    adapter: &A,
    target: &PaneTarget,
    rendered: &str,
    method: SubmitMethod,
) -> Result<(), SessionError> {
    match method {
        SubmitMethod::Standard => {
            adapter.send_keys(target, rendered, false).await?;
            adapter.send_keys(target, SUBMIT_KEY, false).await
        }
        SubmitMethod::PasteBuffer => {
            adapter.set_paste_buffer(rendered).await?;
            adapter.paste_buffer(target).await?;
            adapter.send_keys(target, SUBMIT_KEY, false).await
        }
        SubmitMethod::LiteralKeys => {
            adapter.send_keys(target, rendered, true).await?;
            adapter.send_keys(target, SUBMIT_KEY, false).await
        }
        SubmitMethod::TrailingNewline => {
            adapter.send_keys(target, &format!("{rendered}\n"), true).await?;
            adapter.send_keys(target, "\r", true).await
        }
    }
}

/// Submission succeeds if the tail changed and either the chunk text is no
/// longer visible in the input area, or new lines appeared (an agent
/// response indicator) — spec §4.4 step 3b.
fn verify_submitted(before: &str, after: &str, rendered: &str) -> bool {
    if after == before {
        return false;
    }
    !after.contains(rendered) || after.lines().count() > before.lines().count()
}

#[cfg(test)]
#[path = "submitter_tests.rs"]
mod tests;
