// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! orc-core: shared data model for the agent fleet orchestrator.

pub mod agent;
pub mod classify;
pub mod error;
pub mod id;
pub mod message;
pub mod pane_target;
pub mod time_fmt;

pub use agent::{AgentRecord, AgentRole, PaneState};
pub use classify::{classify as classify_pane, has_readiness_indicator, hash_tail, IDLE_TICKS, UNRESPONSIVE_TICKS};
pub use error::OrcError;
pub use id::{IdGen, UuidIdGen};
pub use message::{BroadcastJob, BroadcastResult, Chunk, ChunkPlan, Message, RecoveryDecision, WindowSelector};
pub use pane_target::PaneTarget;
pub use time_fmt::format_elapsed;
