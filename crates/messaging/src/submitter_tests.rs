// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use orc_adapters::session::{FakeAdapter, FakeCall};
use orc_core::PaneTarget;

use super::*;
use crate::chunker::chunk;

fn fast_config() -> SubmitterConfig {
    SubmitterConfig {
        clear_key_spacing: Duration::from_millis(0),
        verify_settle_delay: Duration::from_millis(0),
        inter_chunk_delay: Duration::from_millis(0),
    }
}

#[tokio::test]
async fn fails_fast_when_pane_not_ready() {
    let adapter = FakeAdapter::new();
    adapter.push_capture("still booting, no prompt yet");
    let target = PaneTarget::new("demo", 1);
    let plan = chunk("hello", 200);

    let err = submit(&adapter, &target, &plan, fast_config()).await.unwrap_err();
    assert!(matches!(err, OrcError::NotReady(_)));
    // No clear/send keys attempted before the readiness check fails.
    assert!(!adapter.calls().iter().any(|c| matches!(c, FakeCall::SendKeys { .. })));
}

#[tokio::test]
async fn standard_method_succeeds_when_chunk_clears_from_input() {
    let adapter = FakeAdapter::new();
    let target = PaneTarget::new("demo", 1);
    adapter.push_capture("> ready for input"); // readiness check
    adapter.push_capture("> ready for input\nhello\nagent: got it"); // post-submit verify

    let plan = chunk("hello", 200);
    submit(&adapter, &target, &plan, fast_config()).await.unwrap();

    let calls = adapter.calls();
    let sends: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            FakeCall::SendKeys { keys, .. } => Some(keys.as_str()),
            _ => None,
        })
        .collect();
    assert!(sends.contains(&"hello"));
    assert!(sends.contains(&"C-Enter"));
}

#[tokio::test]
async fn falls_back_through_methods_until_one_verifies() {
    let adapter = FakeAdapter::new();
    let target = PaneTarget::new("demo", 1);
    adapter.push_capture("> ready"); // readiness
    adapter.push_capture("> ready"); // standard attempt: unchanged, stuck in input
    adapter.push_capture("> ready"); // paste-buffer attempt: still stuck
    adapter.push_capture("> done"); // literal-keys attempt: text cleared, submitted

    let plan = chunk("hello", 200);
    submit(&adapter, &target, &plan, fast_config()).await.unwrap();
}

#[tokio::test]
async fn submission_failed_when_all_methods_exhausted() {
    let adapter = FakeAdapter::new();
    let target = PaneTarget::new("demo", 1);
    adapter.push_capture("> ready");
    for _ in 0..4 {
        // every method's verify capture is identical to before_tail: never verifies.
        adapter.push_capture("> ready");
    }

    let plan = chunk("hello", 200);
    let err = submit(&adapter, &target, &plan, fast_config()).await.unwrap_err();
    match err {
        OrcError::SubmissionFailed { chunk_index, methods_tried } => {
            assert_eq!(chunk_index, 0);
            assert_eq!(methods_tried.len(), 4);
        }
        other => panic!("expected SubmissionFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn multi_chunk_plan_submits_chunks_in_order() {
    let adapter = FakeAdapter::new();
    let target = PaneTarget::new("demo", 1);
    let body = format!("{} tail", "word ".repeat(60));
    let plan = chunk(&body, 200);
    assert!(plan.len() > 1);

    adapter.push_capture("> ready");
    for i in 0..plan.len() {
        adapter.push_capture(format!("> ready\nchunk {i} delivered"));
    }

    submit(&adapter, &target, &plan, fast_config()).await.unwrap();

    let calls = adapter.calls();
    let rendered_texts: Vec<String> = plan.chunks.iter().map(|c| c.rendered()).collect();
    let rendered_sent: Vec<&str> = calls
        .iter()
        .filter_map(|c| match c {
            FakeCall::SendKeys { keys, .. } if rendered_texts.contains(keys) => Some(keys.as_str()),
            _ => None,
        })
        .collect();
    // Each chunk's rendered text (with pagination header) was sent, in order.
    assert_eq!(rendered_sent, rendered_texts);
}

#[tokio::test]
async fn clear_sequence_sent_before_any_chunk() {
    let adapter = FakeAdapter::new();
    let target = PaneTarget::new("demo", 1);
    adapter.push_capture("> ready");
    adapter.push_capture("> ready\nsent");

    let plan = chunk("hi", 200);
    submit(&adapter, &target, &plan, fast_config()).await.unwrap();

    let calls = adapter.calls();
    let clear_keys: Vec<&str> = calls
        .iter()
        .filter_map(|c| match c {
            FakeCall::SendKeys { keys, .. } if ["C-c", "C-u", "Escape", "C-a", "C-k"].contains(&keys.as_str()) => {
                Some(keys.as_str())
            }
            _ => None,
        })
        .collect();
    assert_eq!(clear_keys, vec!["C-c", "C-u", "Escape", "C-a", "C-k"]);
}
