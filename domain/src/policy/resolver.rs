//! Effective policy resolution
//!
//! A motion may carry its own quorum and vote policy; when it doesn't, the
//! meeting default applies. This is the only place that rule lives.
//!
//! ```text
//! effective = motion override (set and non-blank)
//!           | meeting default (set and non-blank)
//!           | nothing -> ConfigurationError when the policy is required
//! ```

use crate::core::error::ConfigurationError;
use crate::core::ids::{MotionId, PolicyId};
use crate::meeting::entities::Meeting;
use crate::motion::entities::Motion;
use serde::{Deserialize, Serialize};

/// One resolved policy slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPolicy {
    /// Effective policy id, `None` when neither override nor default is set
    pub id: Option<PolicyId>,
    /// Whether the id comes from the motion override
    pub is_override: bool,
}

impl ResolvedPolicy {
    fn pick(override_id: Option<&PolicyId>, default_id: Option<&PolicyId>) -> Self {
        if let Some(id) = override_id.filter(|id| !id.is_blank()) {
            return Self {
                id: Some(id.clone()),
                is_override: true,
            };
        }
        Self {
            id: default_id.filter(|id| !id.is_blank()).cloned(),
            is_override: false,
        }
    }
}

/// Effective quorum and vote policies for a motion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyResolution {
    pub motion: MotionId,
    pub quorum: ResolvedPolicy,
    pub vote: ResolvedPolicy,
}

impl PolicyResolution {
    /// Effective quorum policy id, or a configuration error when none is set
    pub fn quorum_policy_id(&self) -> Result<&PolicyId, ConfigurationError> {
        self.quorum
            .id
            .as_ref()
            .ok_or_else(|| ConfigurationError::NoQuorumPolicy {
                motion: self.motion.clone(),
            })
    }

    /// Effective vote policy id, or a configuration error when none is set
    pub fn vote_policy_id(&self) -> Result<&PolicyId, ConfigurationError> {
        self.vote
            .id
            .as_ref()
            .ok_or_else(|| ConfigurationError::NoVotePolicy {
                motion: self.motion.clone(),
            })
    }

    /// Whether both slots resolved to a policy
    pub fn is_complete(&self) -> bool {
        self.quorum.id.is_some() && self.vote.id.is_some()
    }
}

/// Resolves the effective policies of a motion
pub struct PolicyResolver;

impl PolicyResolver {
    /// Pure function of the motion and its meeting.
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_domain::meeting::Meeting;
    /// use assembly_domain::motion::Motion;
    /// use assembly_domain::policy::PolicyResolver;
    ///
    /// let meeting = Meeting::new("agm-2026")
    ///     .with_default_policies("qp-ordinary", "vp-simple");
    /// let motion = Motion::new("m1", "agm-2026", "Approve accounts")
    ///     .with_vote_policy("vp-two-thirds");
    ///
    /// let resolution = PolicyResolver::resolve(&motion, &meeting);
    /// assert_eq!(resolution.quorum.id.as_ref().unwrap().as_str(), "qp-ordinary");
    /// assert!(!resolution.quorum.is_override);
    /// assert_eq!(resolution.vote.id.as_ref().unwrap().as_str(), "vp-two-thirds");
    /// assert!(resolution.vote.is_override);
    /// ```
    pub fn resolve(motion: &Motion, meeting: &Meeting) -> PolicyResolution {
        PolicyResolution {
            motion: motion.id.clone(),
            quorum: ResolvedPolicy::pick(
                motion.quorum_policy_id.as_ref(),
                meeting.default_quorum_policy_id.as_ref(),
            ),
            vote: ResolvedPolicy::pick(
                motion.vote_policy_id.as_ref(),
                meeting.default_vote_policy_id.as_ref(),
            ),
        }
    }
}
