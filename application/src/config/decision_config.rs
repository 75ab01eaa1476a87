//! Decision parameters: how use cases pick inputs and guard lifecycles.
//!
//! [`DecisionConfig`] groups the switches that are site policy rather than
//! engine rules. The engine itself is unaware of them.

use serde::{Deserialize, Serialize};

/// Use case behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// A saved manual tally supersedes the electronic ballots.
    pub prefer_manual_tally: bool,
    /// Motions may only be opened while the meeting is live.
    pub require_live_meeting: bool,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            prefer_manual_tally: true,
            require_live_meeting: true,
        }
    }
}

impl DecisionConfig {
    // ==================== Builder Methods ====================

    pub fn with_prefer_manual_tally(mut self, prefer: bool) -> Self {
        self.prefer_manual_tally = prefer;
        self
    }

    pub fn with_require_live_meeting(mut self, require: bool) -> Self {
        self.require_live_meeting = require;
        self
    }
}
