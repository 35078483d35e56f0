// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod agent;
pub mod monitor;
pub mod pm;
pub mod team;

/// Parses a `agent spawn`/`pm create` role string into an [`orc_core::AgentRole`].
pub fn parse_role(s: &str) -> orc_core::AgentRole {
    match s {
        "orchestrator" => orc_core::AgentRole::Orchestrator,
        "pm" => orc_core::AgentRole::Pm,
        other => orc_core::AgentRole::Worker(other.to_string()),
    }
}
