//! Decision configuration from TOML (`[decision]` section)

use assembly_application::DecisionConfig;
use serde::{Deserialize, Serialize};

/// Raw decision configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDecisionConfig {
    /// A saved manual tally supersedes electronic ballots
    pub prefer_manual_tally: bool,
    /// Motions may only be opened while the meeting is live
    pub require_live_meeting: bool,
}

impl Default for FileDecisionConfig {
    fn default() -> Self {
        let defaults = DecisionConfig::default();
        Self {
            prefer_manual_tally: defaults.prefer_manual_tally,
            require_live_meeting: defaults.require_live_meeting,
        }
    }
}

impl FileDecisionConfig {
    pub fn to_decision_config(&self) -> DecisionConfig {
        DecisionConfig::default()
            .with_prefer_manual_tally(self.prefer_manual_tally)
            .with_require_live_meeting(self.require_live_meeting)
    }
}
