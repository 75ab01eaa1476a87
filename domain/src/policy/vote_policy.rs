//! Vote (majority) policy definitions

use super::quorum_policy::check_threshold;
use crate::core::error::ConfigurationError;
use crate::core::ids::PolicyId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Denominator of the majority ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MajorityBase {
    /// for + against (abstentions excluded unless counted as against)
    #[default]
    Expressed,
    /// Everyone eligible, whether or not they voted
    TotalEligible,
}

impl fmt::Display for MajorityBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MajorityBase::Expressed => write!(f, "expressed"),
            MajorityBase::TotalEligible => write!(f, "total_eligible"),
        }
    }
}

/// Vote policy record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotePolicy {
    pub id: PolicyId,
    pub name: String,
    #[serde(default)]
    pub base: MajorityBase,
    pub threshold: f64,
    #[serde(default)]
    pub abstention_as_against: bool,
    /// Tally by voting weight (`true`) or by head count (`false`)
    #[serde(default = "default_weighted")]
    pub weighted: bool,
}

fn default_weighted() -> bool {
    true
}

impl VotePolicy {
    pub fn new(
        id: impl Into<PolicyId>,
        name: impl Into<String>,
        base: MajorityBase,
        threshold: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base,
            threshold,
            abstention_as_against: false,
            weighted: true,
        }
    }

    /// Simple majority of expressed votes
    pub fn simple_majority(id: impl Into<PolicyId>) -> Self {
        Self::new(id, "Simple majority", MajorityBase::Expressed, 0.5)
    }

    pub fn with_abstention_as_against(mut self) -> Self {
        self.abstention_as_against = true;
        self
    }

    pub fn by_head_count(mut self) -> Self {
        self.weighted = false;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_threshold(&self.id, "threshold", self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults_to_weighted_expressed() {
        let json = r#"{"id":"vp","name":"Simple","threshold":0.5}"#;
        let policy: VotePolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.base, MajorityBase::Expressed);
        assert!(policy.weighted);
        assert!(!policy.abstention_as_against);
    }

    #[test]
    fn test_validate() {
        assert!(VotePolicy::simple_majority("vp").validate().is_ok());
        let two_thirds = VotePolicy::new("vp", "2/3", MajorityBase::TotalEligible, 2.0 / 3.0);
        assert!(two_thirds.validate().is_ok());
        let broken = VotePolicy::new("vp", "bad", MajorityBase::Expressed, -0.1);
        assert!(broken.validate().is_err());
    }
}
