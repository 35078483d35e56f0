// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! orc-messaging: the Messaging Layer (spec §4.3–§4.4) — chunks a logical
//! message into UI-sized pieces and submits them to an agent's pane,
//! verifying each one actually left the input buffer.

pub mod chunker;
pub mod submitter;

pub use chunker::{chunk, chunk_default, DEFAULT_MAX_CHUNK_SIZE};
pub use submitter::{submit, SubmitterConfig, CAPTURE_TAIL_LINES};
