// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Multiplexer adapters: the only part of the system that shells out to the
//! external terminal multiplexer (spec §4.1). Every other component goes
//! through [`session::SessionAdapter`].

pub mod session;
pub mod subprocess;

pub use session::{NoopAdapter, SessionAdapter, SessionError, SessionInfo, WindowInfo};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use session::{FakeAdapter, FakeCall};
