// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent Fleet Supervisor daemon (`orcd`).
//!
//! Background process owning the discover → classify → decide → apply loop
//! (spec §4.6) plus a small control socket for `monitor status|stop|pause`.
//! Not meant to be invoked directly — `orc monitor start` launches it.

use std::time::Duration;

use orc_adapters::session::TmuxAdapter;
use orc_daemon::env::Paths;
use orc_daemon::listener::{self, ListenerState};
use orc_daemon::supervisor::{BackoffPolicy, Supervisor, MIN_TICK_INTERVAL};
use orc_daemon::{graceful, singleton};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(30);

struct Args {
    tick_interval: Duration,
}

fn parse_args() -> Result<Args, String> {
    let mut tick_interval = DEFAULT_TICK_INTERVAL;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("orcd {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("orcd {}", env!("CARGO_PKG_VERSION"));
                println!("Agent fleet supervisor daemon. Not invoked directly; use `orc monitor start`.");
                println!();
                println!("OPTIONS:");
                println!("    --interval <SECONDS>   Supervisor tick interval (default 30, minimum 10)");
                println!("    --supervised           Accept restart supervision from the launching CLI");
                std::process::exit(0);
            }
            "--interval" => {
                let value = args.next().ok_or("--interval requires a value")?;
                let secs: u64 = value.parse().map_err(|_| format!("invalid --interval value {value:?}"))?;
                tick_interval = Duration::from_secs(secs).max(MIN_TICK_INTERVAL);
            }
            "--supervised" => {} // acknowledged; no additional behavior required here
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }
    Ok(Args { tick_interval })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    let paths = Paths::from_env();
    paths.ensure_dirs()?;
    rotate_log_if_needed(&paths.log_file);
    let _log_guard = setup_logging(&paths)?;

    info!("starting orcd");

    let guard = match singleton::acquire(&paths) {
        Ok(g) => g,
        Err(orc_core::OrcError::AlreadyRunning { pid }) => {
            eprintln!("orcd is already running (pid {pid})");
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "failed to acquire singleton lock");
            return Err(e.into());
        }
    };
    graceful::clear(&paths)?;

    let adapter = TmuxAdapter::new();
    let supervisor = Supervisor::new(adapter, paths.clone(), BackoffPolicy::default());

    let listener_state = std::sync::Arc::new(ListenerState {
        table: supervisor.table(),
        paths: paths.clone(),
        started_at: std::time::Instant::now(),
        shutdown: tokio::sync::Notify::new(),
    });
    let socket_path = paths.root.join("daemon.sock");
    let listener_state_clone = std::sync::Arc::clone(&listener_state);
    let listener_handle = tokio::spawn(async move {
        if let Err(e) = listener::serve(socket_path, listener_state_clone).await {
            error!(error = %e, "control listener exited");
        }
    });

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut tick = tokio::time::interval(args.tick_interval);

    info!(interval_secs = args.tick_interval.as_secs(), "orcd ready");
    println!("READY");

    loop {
        tokio::select! {
            _ = tick.tick() => {
                if let Err(e) = supervisor.tick().await {
                    error!(error = %e, "supervisor tick failed");
                }
            }
            _ = listener_state.shutdown.notified() => {
                info!("shutdown requested via control socket");
                break;
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM");
                graceful::set(&paths)?;
                break;
            }
            _ = sigint.recv() => {
                info!("received SIGINT");
                graceful::set(&paths)?;
                break;
            }
        }
    }

    listener_handle.abort();
    guard.remove_pid_file();
    info!("orcd stopped");
    Ok(())
}

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

fn rotate_log_if_needed(log_path: &std::path::Path) {
    let Ok(metadata) = std::fs::metadata(log_path) else { return };
    if metadata.len() < MAX_LOG_SIZE {
        return;
    }
    let rotated = log_path.with_extension("log.1");
    let _ = std::fs::rename(log_path, rotated);
}

fn setup_logging(paths: &Paths) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let file_appender = tracing_appender::rolling::never(&paths.log_dir, "monitor.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(non_blocking)).init();

    Ok(guard)
}
