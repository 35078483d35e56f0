// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unix-socket control listener (spec §6): answers `monitor status|stop|pause`
//! requests against the live Supervisor's in-memory state, without requiring
//! callers to share process memory.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use tokio::net::{UnixListener, UnixStream};

use orc_core::OrcError;

use crate::env::Paths;
use crate::graceful;
use crate::pause;
use crate::protocol::{read_frame, write_frame, Request, Response};
use crate::supervisor::AgentTable;

pub struct ListenerState {
    pub table: AgentTable,
    pub paths: Paths,
    pub started_at: Instant,
    pub shutdown: tokio::sync::Notify,
}

/// Binds and serves the control socket until `shutdown` is notified.
/// Grounded on the teacher's per-connection accept loop, narrowed to a
/// handful of read-only/control commands instead of a full command router.
pub async fn serve(socket_path: std::path::PathBuf, state: Arc<ListenerState>) -> std::io::Result<()> {
    let _ = std::fs::remove_file(&socket_path);
    let listener = UnixListener::bind(&socket_path)?;

    loop {
        tokio::select! {
            _ = state.shutdown.notified() => {
                let _ = std::fs::remove_file(&socket_path);
                return Ok(());
            }
            accepted = listener.accept() => {
                let (stream, _) = accepted?;
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, &state).await {
                        tracing::warn!(error = %e, "control connection error");
                    }
                });
            }
        }
    }
}

async fn handle_connection(mut stream: UnixStream, state: &ListenerState) -> std::io::Result<()> {
    let request: Request = read_frame(&mut stream).await?;
    let start = Instant::now();
    let response = dispatch(&request, state);
    write_frame(&mut stream, &response).await?;
    let _ = start; // execution_time is filled in by dispatch itself
    Ok(())
}

fn dispatch(request: &Request, state: &ListenerState) -> Response {
    let start = Instant::now();
    let result = match request.command.as_str() {
        "monitor_status" => Ok(monitor_status(state)),
        "monitor_pause" => {
            let seconds = request.args.first().and_then(|s| s.parse::<u64>().ok()).unwrap_or(300);
            match pause::pause_for(&state.paths, Duration::from_secs(seconds)) {
                Ok(()) => Ok(json!({"paused_for_seconds": seconds})),
                Err(e) => Err(OrcError::TransportError(e.to_string())),
            }
        }
        "monitor_stop" => {
            if let Err(e) = graceful::set(&state.paths) {
                Err(OrcError::TransportError(e.to_string()))
            } else {
                state.shutdown.notify_one();
                Ok(json!({"stopping": true}))
            }
        }
        other => Err(OrcError::BadArgument(format!("unknown command {other:?}"))),
    };

    let elapsed = start.elapsed();
    match result {
        Ok(value) => Response::ok(request, value, String::new(), elapsed),
        Err(e) => Response::err(request, &e, elapsed),
    }
}

fn monitor_status(state: &ListenerState) -> serde_json::Value {
    let table = state.table.lock();
    let agents: Vec<serde_json::Value> = table
        .values()
        .map(|r| {
            json!({
                "target": r.target.to_string(),
                "role": r.role.role_str(),
                "state": format!("{:?}", r.state),
            })
        })
        .collect();

    json!({
        "uptime_seconds": state.started_at.elapsed().as_secs(),
        "paused": pause::is_paused(&state.paths),
        "agents": agents,
    })
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
