// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;

use serial_test::serial;

use super::*;

static TEST_PREFIX: LazyLock<String> = LazyLock::new(|| {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().subsec_nanos();
    format!("orct{:04x}", nanos & 0xFFFF)
});

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

fn unique_name(suffix: &str) -> String {
    let id = SESSION_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}-{}", *TEST_PREFIX, suffix, id)
}

fn tmux_available() -> bool {
    std::process::Command::new("tmux").arg("-V").output().map(|o| o.status.success()).unwrap_or(false)
}

macro_rules! skip_if_no_tmux {
    () => {
        if !tmux_available() {
            eprintln!("tmux not available, skipping");
            return;
        }
    };
}

// Tests share the real tmux server, so they're serialized to avoid
// cross-test session collisions.

#[tokio::test]
#[serial(tmux)]
async fn create_session_then_has_session() {
    skip_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let name = unique_name("create");

    adapter.create_session(&name, "main", Path::new("/tmp")).await.unwrap();
    assert!(adapter.has_session(&name).await.unwrap());

    adapter.kill_session(&name).await.unwrap();
}

#[tokio::test]
#[serial(tmux)]
async fn create_window_resolves_index_by_name() {
    skip_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let name = unique_name("window");
    adapter.create_session(&name, "main", Path::new("/tmp")).await.unwrap();

    let index = adapter.create_window(&name, "Claude-pm", Path::new("/tmp")).await.unwrap();
    let windows = adapter.list_windows(&name).await.unwrap();
    assert!(windows.iter().any(|w| w.index == index && w.name == "Claude-pm"));

    adapter.kill_session(&name).await.unwrap();
}

#[tokio::test]
#[serial(tmux)]
async fn capture_pane_reads_output() {
    skip_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let name = unique_name("capture");
    adapter.create_session(&name, "main", Path::new("/tmp")).await.unwrap();
    let target = PaneTarget::new(&name, 0);

    adapter.send_keys(&target, "echo hello-from-pane", true).await.unwrap();
    adapter.send_keys(&target, "Enter", false).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;

    let tail = adapter.capture_pane(&target, 50).await.unwrap();
    assert!(tail.contains("hello-from-pane"), "got: {tail}");

    adapter.kill_session(&name).await.unwrap();
}

#[tokio::test]
#[serial(tmux)]
async fn kill_window_is_idempotent() {
    skip_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let name = unique_name("killidem");
    adapter.create_session(&name, "main", Path::new("/tmp")).await.unwrap();
    let target = PaneTarget::new(&name, 99);

    // Window 99 never existed; killing it must not error (idempotent per §4.1).
    adapter.kill_window(&target).await.unwrap();

    adapter.kill_session(&name).await.unwrap();
}

#[tokio::test]
#[serial(tmux)]
async fn kill_session_on_unknown_session_is_idempotent() {
    skip_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    adapter.kill_session(&unique_name("never-existed")).await.unwrap();
}

#[tokio::test]
#[serial(tmux)]
async fn list_windows_on_unknown_session_is_not_found() {
    skip_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let err = adapter.list_windows(&unique_name("absent")).await.unwrap_err();
    assert!(matches!(err, SessionError::NotFound(_)));
}

#[tokio::test]
#[serial(tmux)]
async fn paste_buffer_round_trips_through_capture() {
    skip_if_no_tmux!();
    let adapter = TmuxAdapter::new();
    let name = unique_name("paste");
    adapter.create_session(&name, "main", Path::new("/tmp")).await.unwrap();
    let target = PaneTarget::new(&name, 0);

    adapter.set_paste_buffer("pasted-payload").await.unwrap();
    adapter.paste_buffer(&target).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let tail = adapter.capture_pane(&target, 50).await.unwrap();
    assert!(tail.contains("pasted-payload"), "got: {tail}");

    adapter.kill_session(&name).await.unwrap();
}
