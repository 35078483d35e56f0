// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `team broadcast` (spec §6).

use std::collections::BTreeSet;

use clap::Args;
use serde_json::json;

use orc_adapters::session::TmuxAdapter;
use orc_core::{BroadcastJob, IdGen, UuidIdGen, WindowSelector};
use orc_daemon::BroadcastCoordinator;

use crate::output::{emit, fail};

#[derive(Args)]
pub struct TeamArgs {
    #[command(subcommand)]
    pub command: TeamCommand,
}

#[derive(clap::Subcommand)]
pub enum TeamCommand {
    /// Broadcast a message to a filtered subset of a session's agents
    Broadcast {
        session: String,
        body: String,
        /// Comma-separated role filter (e.g. `frontend,backend`)
        #[arg(long = "roles", value_delimiter = ',')]
        roles: Vec<String>,
        /// Comma-separated window names or indices to exclude
        #[arg(long = "exclude", value_delimiter = ',')]
        exclude: Vec<String>,
    },
}

pub async fn run(args: TeamArgs, json: bool) {
    match args.command {
        TeamCommand::Broadcast { session, body, roles, exclude } => {
            broadcast(&session, &body, roles, exclude, json).await
        }
    }
}

async fn broadcast(session: &str, body: &str, roles: Vec<String>, exclude: Vec<String>, as_json: bool) {
    let adapter = TmuxAdapter::new();
    let coordinator = BroadcastCoordinator::new(adapter);

    let excludes: BTreeSet<WindowSelector> = exclude
        .into_iter()
        .map(|s| match s.parse::<u32>() {
            Ok(index) => WindowSelector::Index(index),
            Err(_) => WindowSelector::Name(s),
        })
        .collect();

    let job = BroadcastJob {
        session: session.to_string(),
        body: body.to_string(),
        role_filter: roles.into_iter().collect(),
        excludes,
        correlation_id: UuidIdGen.next(),
    };

    match coordinator.broadcast(&job).await {
        Ok(results) => emit(as_json, &json!({"results": results}), |_| orc_daemon::broadcast::summarize(&results)),
        Err(e) => fail(as_json, &e),
    }
}
