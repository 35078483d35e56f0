// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pm create <session>` (spec §6): Lifecycle.Spawn with role=pm, with
//! pause-during-spawn and the cross-process spawn-slot guard already
//! handled inside `LifecycleController::spawn`.

use clap::Args;
use serde_json::json;

use orc_adapters::session::TmuxAdapter;
use orc_core::AgentRole;
use orc_daemon::{LifecycleConfig, LifecycleController, Paths};

use crate::output::{emit, fail};

#[derive(Args)]
pub struct PmArgs {
    /// Target session name
    pub session: String,
    /// Briefing text delivered once the PM is ready
    #[arg(long = "briefing", default_value = "")]
    pub briefing: String,
}

pub async fn run(args: PmArgs, json: bool) {
    let paths = Paths::from_env();
    let adapter = TmuxAdapter::new();
    let controller = LifecycleController::new(adapter, paths, LifecycleConfig::default());
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));

    match controller.spawn(&args.session, AgentRole::Pm, &cwd, &args.briefing).await {
        Ok(target) => emit(json, &json!({"target": target.to_string()}), |_| format!("PM spawned at {target}")),
        Err(e) => fail(json, &e),
    }
}
