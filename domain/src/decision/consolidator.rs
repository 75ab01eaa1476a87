//! Decision consolidation
//!
//! Combines a quorum result and a majority result into the final, auditable
//! decision on a motion. Recomputing with the same inputs gives the same
//! decision: no counters, no timestamps.

use crate::core::ids::{MotionId, PolicyId};
use crate::quorum::evaluator::QuorumResult;
use crate::vote::ballot::VoteCounts;
use crate::vote::majority::MajorityResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Adopted,
    Rejected,
    /// The assembly could not validly decide (quorum not met)
    Undecided,
}

impl DecisionStatus {
    pub fn is_adopted(&self) -> bool {
        matches!(self, DecisionStatus::Adopted)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, DecisionStatus::Rejected)
    }

    pub fn is_undecided(&self) -> bool {
        matches!(self, DecisionStatus::Undecided)
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionStatus::Adopted => write!(f, "adopted"),
            DecisionStatus::Rejected => write!(f, "rejected"),
            DecisionStatus::Undecided => write!(f, "undecided"),
        }
    }
}

/// Why a decision has its status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    QuorumNotMet,
    MajorityReached,
    MajorityNotReached,
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonCode::QuorumNotMet => write!(f, "quorum_not_met"),
            ReasonCode::MajorityReached => write!(f, "majority_reached"),
            ReasonCode::MajorityNotReached => write!(f, "majority_not_reached"),
        }
    }
}

/// Where the vote figures came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TallySource {
    #[default]
    Electronic,
    Manual,
}

impl fmt::Display for TallySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TallySource::Electronic => write!(f, "electronic"),
            TallySource::Manual => write!(f, "manual"),
        }
    }
}

/// Final decision on a motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub motion_id: MotionId,
    pub status: DecisionStatus,
    pub reason: ReasonCode,
    pub quorum_ratio: f64,
    pub quorum_ratio2: Option<f64>,
    pub quorum_threshold: f64,
    /// Reported even when quorum is not met, for information only
    pub majority_ratio: f64,
    pub majority_threshold: f64,
    /// Raw figures as cast
    pub tally: VoteCounts,
    pub tally_source: TallySource,
    pub quorum_policy_id: PolicyId,
    pub vote_policy_id: PolicyId,
}

pub struct DecisionConsolidator;

impl DecisionConsolidator {
    /// Status and reason from the two evaluator verdicts
    pub fn verdict(quorum_met: bool, majority_met: bool) -> (DecisionStatus, ReasonCode) {
        match (quorum_met, majority_met) {
            (false, _) => (DecisionStatus::Undecided, ReasonCode::QuorumNotMet),
            (true, true) => (DecisionStatus::Adopted, ReasonCode::MajorityReached),
            (true, false) => (DecisionStatus::Rejected, ReasonCode::MajorityNotReached),
        }
    }

    /// Build the decision for a motion.
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_domain::decision::{DecisionConsolidator, DecisionStatus, TallySource};
    /// use assembly_domain::meeting::AttendanceAggregate;
    /// use assembly_domain::policy::{QuorumBasis, QuorumPolicy, VotePolicy};
    /// use assembly_domain::quorum::QuorumEvaluator;
    /// use assembly_domain::vote::{MajorityEvaluator, VoteCounts};
    ///
    /// let quorum = QuorumEvaluator::evaluate(
    ///     &QuorumPolicy::single("qp", "Half", QuorumBasis::EligibleWeight, 0.5),
    ///     &AttendanceAggregate::new(8, 60.0, 10, 100.0),
    ///     1,
    /// ).unwrap();
    /// let majority = MajorityEvaluator::evaluate(
    ///     &VotePolicy::simple_majority("vp"),
    ///     &VoteCounts::new(40.0, 15.0, 5.0),
    ///     100.0,
    /// ).unwrap();
    ///
    /// let decision = DecisionConsolidator::consolidate("m1", &quorum, &majority, TallySource::Electronic);
    /// assert_eq!(decision.status, DecisionStatus::Adopted);
    /// ```
    pub fn consolidate(
        motion_id: impl Into<MotionId>,
        quorum: &QuorumResult,
        majority: &MajorityResult,
        tally_source: TallySource,
    ) -> Decision {
        let (status, reason) = Self::verdict(quorum.met, majority.met);

        Decision {
            motion_id: motion_id.into(),
            status,
            reason,
            quorum_ratio: quorum.ratio,
            quorum_ratio2: quorum.ratio2,
            quorum_threshold: quorum.threshold,
            majority_ratio: majority.ratio,
            majority_threshold: majority.threshold,
            tally: majority.tally,
            tally_source,
            quorum_policy_id: quorum.policy_id.clone(),
            vote_policy_id: majority.policy_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::quorum_policy::QuorumMode;
    use crate::policy::vote_policy::MajorityBase;

    fn quorum(met: bool) -> QuorumResult {
        QuorumResult {
            policy_id: "qp".into(),
            mode: QuorumMode::Single,
            met,
            ratio: if met { 0.6 } else { 0.3 },
            ratio2: None,
            threshold: 0.5,
            threshold2: None,
            convocation_no: 1,
        }
    }

    fn majority(met: bool) -> MajorityResult {
        MajorityResult {
            policy_id: "vp".into(),
            met,
            ratio: if met { 0.7 } else { 0.2 },
            threshold: 0.5,
            base: MajorityBase::Expressed,
            denominator: 10.0,
            effective_against: 3.0,
            tally: VoteCounts::new(7.0, 3.0, 1.0),
        }
    }

    #[test]
    fn test_quorum_not_met_is_undecided_whatever_the_majority() {
        for majority_met in [true, false] {
            let decision = DecisionConsolidator::consolidate(
                "m1",
                &quorum(false),
                &majority(majority_met),
                TallySource::Electronic,
            );
            assert_eq!(decision.status, DecisionStatus::Undecided);
            assert_eq!(decision.reason, ReasonCode::QuorumNotMet);
        }
    }

    #[test]
    fn test_majority_ratio_reported_when_undecided() {
        let decision = DecisionConsolidator::consolidate(
            "m1",
            &quorum(false),
            &majority(true),
            TallySource::Manual,
        );
        assert_eq!(decision.majority_ratio, 0.7);
        assert_eq!(decision.tally_source, TallySource::Manual);
    }

    #[test]
    fn test_adopted_and_rejected() {
        let adopted =
            DecisionConsolidator::consolidate("m1", &quorum(true), &majority(true), TallySource::Electronic);
        assert!(adopted.status.is_adopted());
        assert_eq!(adopted.reason, ReasonCode::MajorityReached);

        let rejected =
            DecisionConsolidator::consolidate("m1", &quorum(true), &majority(false), TallySource::Electronic);
        assert!(rejected.status.is_rejected());
        assert_eq!(rejected.reason, ReasonCode::MajorityNotReached);
    }

    #[test]
    fn test_consolidation_is_idempotent() {
        let first =
            DecisionConsolidator::consolidate("m1", &quorum(true), &majority(true), TallySource::Electronic);
        let second =
            DecisionConsolidator::consolidate("m1", &quorum(true), &majority(true), TallySource::Electronic);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn test_policy_ids_recorded() {
        let decision =
            DecisionConsolidator::consolidate("m1", &quorum(true), &majority(true), TallySource::Electronic);
        assert_eq!(decision.quorum_policy_id.as_str(), "qp");
        assert_eq!(decision.vote_policy_id.as_str(), "vp");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(DecisionStatus::Adopted.to_string(), "adopted");
        assert_eq!(DecisionStatus::Undecided.to_string(), "undecided");
        assert_eq!(ReasonCode::QuorumNotMet.to_string(), "quorum_not_met");
    }
}
