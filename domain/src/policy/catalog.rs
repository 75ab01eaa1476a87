//! Policy catalog
//!
//! The caller fetches the policy records it needs and hands them to the engine
//! in a [`PolicyCatalog`]. The engine never caches policies itself.

use super::quorum_policy::QuorumPolicy;
use super::resolver::PolicyResolution;
use super::vote_policy::VotePolicy;
use crate::core::error::ConfigurationError;
use crate::core::ids::PolicyId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Policies available to a meeting, keyed by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyCatalog {
    #[serde(default)]
    quorum: BTreeMap<PolicyId, QuorumPolicy>,
    #[serde(default)]
    vote: BTreeMap<PolicyId, VotePolicy>,
}

impl PolicyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quorum_policy(mut self, policy: QuorumPolicy) -> Self {
        self.insert_quorum(policy);
        self
    }

    pub fn with_vote_policy(mut self, policy: VotePolicy) -> Self {
        self.insert_vote(policy);
        self
    }

    pub fn insert_quorum(&mut self, policy: QuorumPolicy) {
        self.quorum.insert(policy.id.clone(), policy);
    }

    pub fn insert_vote(&mut self, policy: VotePolicy) {
        self.vote.insert(policy.id.clone(), policy);
    }

    pub fn quorum_policies(&self) -> impl Iterator<Item = &QuorumPolicy> {
        self.quorum.values()
    }

    pub fn vote_policies(&self) -> impl Iterator<Item = &VotePolicy> {
        self.vote.values()
    }

    /// Look up and validate a quorum policy
    pub fn quorum_policy(&self, id: &PolicyId) -> Result<&QuorumPolicy, ConfigurationError> {
        let policy = self
            .quorum
            .get(id)
            .ok_or_else(|| ConfigurationError::UnknownPolicy { policy: id.clone() })?;
        policy.validate()?;
        Ok(policy)
    }

    /// Look up and validate a vote policy
    pub fn vote_policy(&self, id: &PolicyId) -> Result<&VotePolicy, ConfigurationError> {
        let policy = self
            .vote
            .get(id)
            .ok_or_else(|| ConfigurationError::UnknownPolicy { policy: id.clone() })?;
        policy.validate()?;
        Ok(policy)
    }

    /// Effective policies for a resolution, failing on the first missing one
    pub fn effective(
        &self,
        resolution: &PolicyResolution,
    ) -> Result<(&QuorumPolicy, &VotePolicy), ConfigurationError> {
        let quorum = self.quorum_policy(resolution.quorum_policy_id()?)?;
        let vote = self.vote_policy(resolution.vote_policy_id()?)?;
        Ok((quorum, vote))
    }
}
