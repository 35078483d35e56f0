// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `monitor start|stop|status|pause` (spec §6): launches, controls, and
//! queries the Supervisor daemon (`orcd`).

use std::time::{Duration, Instant};

use clap::{Args, Subcommand};
use serde_json::json;

use orc_core::OrcError;
use orc_daemon::{protocol::Request, singleton, Paths};

use crate::client::{ClientError, DaemonClient};
use crate::daemon_process;
use crate::output::{emit, fail};

/// Bound on how long `monitor start` waits for the daemon to write its PID
/// file before reporting failure.
const START_WAIT_TIMEOUT: Duration = Duration::from_secs(5);
const START_WAIT_POLL: Duration = Duration::from_millis(100);

/// Bound on how long `monitor stop` waits for the PID file to disappear
/// after requesting a graceful shutdown.
const STOP_WAIT_TIMEOUT: Duration = Duration::from_secs(10);
const STOP_WAIT_POLL: Duration = Duration::from_millis(100);

#[derive(Args)]
pub struct MonitorArgs {
    #[command(subcommand)]
    pub command: MonitorCommand,
}

#[derive(Subcommand)]
pub enum MonitorCommand {
    /// Launch the supervisor daemon (singleton)
    Start {
        /// Supervisor tick interval in seconds (minimum 10, default 30)
        #[arg(long)]
        interval: Option<u64>,
        /// Accept restart supervision from the launching process
        #[arg(long)]
        supervised: bool,
    },
    /// Stop the supervisor daemon gracefully
    Stop,
    /// Supervisor liveness and pause state
    Status,
    /// Pause the supervisor loop for the given number of seconds (1..300)
    Pause {
        /// Seconds to pause for, 1..=300
        seconds: u64,
    },
    /// Long-running read-only view of supervisor state (out of scope: this
    /// spec implements only the data source, not a rendered dashboard)
    Dashboard,
}

pub async fn run(args: MonitorArgs, json: bool) {
    let paths = Paths::from_env();
    match args.command {
        MonitorCommand::Start { interval, supervised: _ } => start(&paths, interval, json).await,
        MonitorCommand::Stop => stop(&paths, json).await,
        MonitorCommand::Status => status(&paths, json),
        MonitorCommand::Pause { seconds } => pause(&paths, seconds, json).await,
        MonitorCommand::Dashboard => dashboard(&paths, json).await,
    }
}

async fn start(paths: &Paths, interval: Option<u64>, json: bool) {
    if let Some(pid) = singleton::running_pid(paths) {
        fail(json, &OrcError::AlreadyRunning { pid });
    }

    if let Err(e) = daemon_process::spawn_detached(interval) {
        fail(json, &OrcError::TransportError(format!("failed to launch orcd: {e}")));
    }

    let deadline = Instant::now() + START_WAIT_TIMEOUT;
    loop {
        if let Some(pid) = singleton::running_pid(paths) {
            emit(json, &json!({"pid": pid}), |_| format!("supervisor started (pid {pid})"));
            return;
        }
        if Instant::now() >= deadline {
            fail(json, &OrcError::Timeout("orcd did not report ready in time".to_string()));
        }
        tokio::time::sleep(START_WAIT_POLL).await;
    }
}

async fn stop(paths: &Paths, json: bool) {
    let Some(_pid) = singleton::running_pid(paths) else {
        // Idempotent: a second `monitor stop` reports success (spec §8).
        emit(json, &json!({"stopped": false, "reason": "not running"}), |_| "not running".to_string());
        return;
    };

    let client = DaemonClient::new(paths);
    match client.send(Request::new("monitor_stop")).await {
        Ok(response) if response.success => {}
        Ok(response) => {
            let msg = response.error.unwrap_or_else(|| "stop request failed".to_string());
            fail(json, &OrcError::TransportError(msg));
        }
        Err(ClientError::NotRunning) => {
            emit(json, &json!({"stopped": false, "reason": "not running"}), |_| "not running".to_string());
            return;
        }
        Err(e) => fail(json, &OrcError::TransportError(e.to_string())),
    }

    let deadline = Instant::now() + STOP_WAIT_TIMEOUT;
    while singleton::running_pid(paths).is_some() {
        if Instant::now() >= deadline {
            fail(json, &OrcError::Timeout("orcd did not stop in time".to_string()));
        }
        tokio::time::sleep(STOP_WAIT_POLL).await;
    }

    emit(json, &json!({"stopped": true}), |_| "supervisor stopped".to_string());
}

fn status(paths: &Paths, json: bool) {
    let pid = singleton::running_pid(paths);
    let paused_for = orc_daemon::pause::seconds_remaining(paths);

    let value = json!({
        "running": pid.is_some(),
        "pid": pid,
        "paused": paused_for.is_some(),
        "paused_for_seconds": paused_for,
    });

    emit(json, &value, |v| {
        if v["running"].as_bool().unwrap_or(false) {
            let pid = v["pid"].as_u64().unwrap_or(0);
            if let Some(secs) = v["paused_for_seconds"].as_u64() {
                format!("running (pid {pid}), paused for {}", orc_core::format_elapsed(secs))
            } else {
                format!("running (pid {pid})")
            }
        } else {
            "not running".to_string()
        }
    });
}

async fn pause(paths: &Paths, seconds: u64, json: bool) {
    if !(1..=300).contains(&seconds) {
        fail(json, &OrcError::BadArgument(format!("pause seconds must be 1..=300, got {seconds}")));
    }
    if singleton::running_pid(paths).is_none() {
        fail(json, &OrcError::NotFound("supervisor is not running".to_string()));
    }

    let mut request = Request::new("monitor_pause");
    request.args.push(seconds.to_string());

    let client = DaemonClient::new(paths);
    match client.send(request).await {
        Ok(response) if response.success => {
            emit(json, &json!({"paused_for_seconds": seconds}), |_| format!("paused for {seconds}s"));
        }
        Ok(response) => {
            let msg = response.error.unwrap_or_else(|| "pause request failed".to_string());
            fail(json, &OrcError::TransportError(msg));
        }
        Err(e) => fail(json, &OrcError::TransportError(e.to_string())),
    }
}

/// Out of scope per spec §1 (no dashboard rendering); surfaces the same
/// data `monitor status` does, once, rather than a long-running view.
async fn dashboard(paths: &Paths, json: bool) {
    status(paths, json);
}
