// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! orc - Agent Fleet Orchestrator CLI
//!
//! Thin command surface over the three core subsystems (spec §6): enough to
//! spawn/restart/kill/message agents, broadcast to a team, and drive the
//! supervisor daemon. Argument parsing polish, colorized tables, and shell
//! completion are out of scope (spec §1) — this is exactly the surface the
//! reflection bridge and the end-to-end scenarios in spec §8 need.

mod client;
mod commands;
mod daemon_process;
mod output;

use clap::{Parser, Subcommand};

use commands::{agent, monitor, pm, team};

#[derive(Parser)]
#[command(name = "orc", version, about = "Agent fleet orchestrator")]
struct Cli {
    /// Emit machine-readable JSON instead of human text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spawn, restart, kill, and message individual agents
    Agent(agent::AgentArgs),
    /// Broadcast a message to a filtered subset of a session's agents
    Team(team::TeamArgs),
    /// Control the supervisor daemon
    Monitor(monitor::MonitorArgs),
    /// Spawn a Project Manager into a session
    Pm(pm::PmArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Agent(args) => agent::run(args, cli.json).await,
        Commands::Team(args) => team::run(args, cli.json).await,
        Commands::Monitor(args) => monitor::run(args, cli.json).await,
        Commands::Pm(args) => pm::run(args, cli.json).await,
    }
}
