// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stable addressing for a single agent pane inside a multiplexer session.

use std::fmt;
use std::str::FromStr;

use crate::error::OrcError;

/// Identifies one pane as `session:window`.
///
/// The window is an index, not a name — names are used only to *resolve*
/// the index on each lookup, since multiplexers renumber windows when
/// siblings are closed. A `PaneTarget` is only ever compared by value; it
/// does not itself re-resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct PaneTarget {
    pub session: String,
    pub window: u32,
}

impl PaneTarget {
    pub fn new(session: impl Into<String>, window: u32) -> Self {
        Self { session: session.into(), window }
    }
}

impl fmt::Display for PaneTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.session, self.window)
    }
}

impl FromStr for PaneTarget {
    type Err = OrcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (session, window) = s
            .rsplit_once(':')
            .ok_or_else(|| OrcError::BadArgument(format!("expected session:window, got {s:?}")))?;
        if session.is_empty() {
            return Err(OrcError::BadArgument(format!("empty session in {s:?}")));
        }
        let window = window
            .parse::<u32>()
            .map_err(|_| OrcError::BadArgument(format!("non-numeric window in {s:?}")))?;
        Ok(Self::new(session, window))
    }
}

#[cfg(test)]
#[path = "pane_target_tests.rs"]
mod tests;
