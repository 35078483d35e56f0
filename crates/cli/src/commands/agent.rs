// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `agent spawn|restart|kill|message|status` (spec §6).

use clap::{Args, Subcommand};
use serde_json::json;

use orc_adapters::session::TmuxAdapter;
use orc_core::{OrcError, PaneTarget};
use orc_daemon::{LifecycleConfig, LifecycleController, Paths};
use orc_messaging::{chunk_default, submit, SubmitterConfig};

use crate::client::{ClientError, DaemonClient};
use crate::output::{emit, fail};

#[derive(Args)]
pub struct AgentArgs {
    #[command(subcommand)]
    pub command: AgentCommand,
}

#[derive(Subcommand)]
pub enum AgentCommand {
    /// Spawn a new agent into a session
    Spawn {
        /// Agent role: `pm`, `orchestrator`, or a worker label (e.g. `backend`)
        role: String,
        /// Target session name
        session: String,
        /// Briefing text delivered once the agent is ready
        #[arg(long = "briefing", default_value = "")]
        briefing: String,
    },
    /// Restart an agent in place
    Restart {
        /// `session:window`
        target: PaneTarget,
    },
    /// Terminate an agent's window
    Kill {
        /// `session:window`
        target: PaneTarget,
    },
    /// Send a message to a single agent
    Message {
        /// `session:window`
        target: PaneTarget,
        /// Message body
        body: String,
    },
    /// Read-only view of supervisor state
    Status,
}

pub async fn run(args: AgentArgs, json: bool) {
    let paths = Paths::from_env();
    match args.command {
        AgentCommand::Spawn { role, session, briefing } => spawn(&paths, &role, &session, &briefing, json).await,
        AgentCommand::Restart { target } => restart(&paths, &target, json).await,
        AgentCommand::Kill { target } => kill(&paths, &target, json).await,
        AgentCommand::Message { target, body } => message(&target, &body, json).await,
        AgentCommand::Status => status(&paths, json).await,
    }
}

async fn spawn(paths: &Paths, role: &str, session: &str, briefing: &str, json: bool) {
    let adapter = TmuxAdapter::new();
    let controller = LifecycleController::new(adapter, paths.clone(), LifecycleConfig::default());
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let role = super::parse_role(role);

    match controller.spawn(session, role, &cwd, briefing).await {
        Ok(target) => emit(json, &json!({"target": target.to_string()}), |_| format!("spawned {target}")),
        Err(e) => fail(json, &e),
    }
}

async fn restart(paths: &Paths, target: &PaneTarget, json: bool) {
    let adapter = TmuxAdapter::new();
    let controller = LifecycleController::new(adapter, paths.clone(), LifecycleConfig::default());
    match controller.restart(target).await {
        Ok(()) => emit(json, &json!({"target": target.to_string()}), |_| format!("restarted {target}")),
        Err(e) => fail(json, &e),
    }
}

async fn kill(paths: &Paths, target: &PaneTarget, json: bool) {
    let adapter = TmuxAdapter::new();
    let controller = LifecycleController::new(adapter, paths.clone(), LifecycleConfig::default());
    match controller.kill(target).await {
        Ok(()) => emit(json, &json!({"target": target.to_string()}), |_| format!("killed {target}")),
        Err(e) => fail(json, &e),
    }
}

async fn message(target: &PaneTarget, body: &str, json: bool) {
    let adapter = TmuxAdapter::new();
    let plan = chunk_default(body);
    match submit(&adapter, target, &plan, SubmitterConfig::default()).await {
        Ok(()) => emit(json, &json!({"target": target.to_string(), "chunks": plan.len()}), |_| {
            format!("delivered to {target}")
        }),
        Err(e) => fail(json, &e),
    }
}

async fn status(paths: &Paths, json: bool) {
    let client = DaemonClient::new(paths);
    let response = match client.send(orc_daemon::protocol::Request::new("monitor_status")).await {
        Ok(r) => r,
        Err(ClientError::NotRunning) => fail(json, &OrcError::NotFound("supervisor is not running".to_string())),
        Err(e) => fail(json, &OrcError::TransportError(e.to_string())),
    };

    if !response.success {
        let error_type = response.error_type.clone().unwrap_or_else(|| "transport_error".to_string());
        let message = response.error.clone().unwrap_or_else(|| "unknown error".to_string());
        fail(json, &to_orc_error(&error_type, message));
        return;
    }

    emit(json, &response.result, |result| {
        let agents = result["agents"].as_array().cloned().unwrap_or_default();
        let uptime = result["uptime_seconds"].as_u64().map(orc_core::format_elapsed).unwrap_or_else(|| "?".to_string());
        format!("{} agent(s) tracked (uptime {uptime})", agents.len())
    });
}

fn to_orc_error(error_type: &str, message: String) -> OrcError {
    match error_type {
        "not_found" => OrcError::NotFound(message),
        "bad_argument" => OrcError::BadArgument(message),
        "timeout" => OrcError::Timeout(message),
        _ => OrcError::TransportError(message),
    }
}
