//! Majority evaluation

use super::ballot::VoteCounts;
use crate::core::error::ConfigurationError;
use crate::core::ids::PolicyId;
use crate::policy::vote_policy::{MajorityBase, VotePolicy};
use serde::{Deserialize, Serialize};

/// Outcome of a majority evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorityResult {
    pub policy_id: PolicyId,
    pub met: bool,
    /// `for / denominator`, 0 when the denominator is 0
    pub ratio: f64,
    pub threshold: f64,
    pub base: MajorityBase,
    pub denominator: f64,
    /// Against figure used for the ratio (includes abstentions when they count as against)
    pub effective_against: f64,
    /// Figures as cast, before any abstention treatment
    pub tally: VoteCounts,
}

pub struct MajorityEvaluator;

impl MajorityEvaluator {
    /// Evaluate a tally under a vote policy.
    ///
    /// `eligible_total` is the eligible head count or weight (matching the
    /// policy's `weighted` flag) and only matters for the `total_eligible` base.
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_domain::policy::VotePolicy;
    /// use assembly_domain::vote::{MajorityEvaluator, VoteCounts};
    ///
    /// let policy = VotePolicy::simple_majority("vp");
    /// let result = MajorityEvaluator::evaluate(&policy, &VoteCounts::new(10.0, 5.0, 3.0), 0.0).unwrap();
    /// assert_eq!(result.denominator, 15.0);
    /// assert!(result.met);
    /// ```
    pub fn evaluate(
        policy: &VotePolicy,
        tally: &VoteCounts,
        eligible_total: f64,
    ) -> Result<MajorityResult, ConfigurationError> {
        policy.validate()?;

        let for_votes = non_negative(tally.for_votes);
        let against = non_negative(tally.against);
        let abstain = non_negative(tally.abstain);

        let effective_against = if policy.abstention_as_against {
            against + abstain
        } else {
            against
        };

        let denominator = match policy.base {
            MajorityBase::Expressed => for_votes + effective_against,
            MajorityBase::TotalEligible => non_negative(eligible_total),
        };

        let ratio = if denominator > 0.0 {
            for_votes / denominator
        } else {
            0.0
        };

        Ok(MajorityResult {
            policy_id: policy.id.clone(),
            met: denominator > 0.0 && ratio >= policy.threshold,
            ratio,
            threshold: policy.threshold,
            base: policy.base,
            denominator,
            effective_against,
            tally: *tally,
        })
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_expressed_majority() {
        let policy = VotePolicy::simple_majority("vp");
        let result =
            MajorityEvaluator::evaluate(&policy, &VoteCounts::new(10.0, 5.0, 3.0), 0.0).unwrap();
        assert_eq!(result.denominator, 15.0);
        assert!(approx(result.ratio, 0.667));
        assert!(result.met);
    }

    #[test]
    fn test_abstention_as_against() {
        let policy = VotePolicy::simple_majority("vp").with_abstention_as_against();
        let tally = VoteCounts::new(10.0, 5.0, 3.0);
        let result = MajorityEvaluator::evaluate(&policy, &tally, 0.0).unwrap();
        assert_eq!(result.effective_against, 8.0);
        assert_eq!(result.denominator, 18.0);
        assert!(approx(result.ratio, 0.556));
        // raw figures preserved for audit
        assert_eq!(result.tally.abstain, 3.0);
        assert_eq!(result.tally.against, 5.0);
    }

    #[test]
    fn test_zero_expressed_votes_is_not_met() {
        let policy = VotePolicy::simple_majority("vp");
        let result =
            MajorityEvaluator::evaluate(&policy, &VoteCounts::new(0.0, 0.0, 4.0), 0.0).unwrap();
        assert!(!result.met);
        assert_eq!(result.ratio, 0.0);
    }

    #[test]
    fn test_total_eligible_base_ignores_turnout() {
        let policy = VotePolicy::new("vp", "Absolute", MajorityBase::TotalEligible, 0.5);
        let tally = VoteCounts::new(40.0, 5.0, 0.0);
        let result = MajorityEvaluator::evaluate(&policy, &tally, 100.0).unwrap();
        assert_eq!(result.denominator, 100.0);
        assert_eq!(result.ratio, 0.4);
        assert!(!result.met);

        let result = MajorityEvaluator::evaluate(&policy, &tally, 0.0).unwrap();
        assert!(!result.met);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let policy = VotePolicy::simple_majority("vp");
        let result =
            MajorityEvaluator::evaluate(&policy, &VoteCounts::new(5.0, 5.0, 0.0), 0.0).unwrap();
        assert!(result.met);
    }

    #[test]
    fn test_invalid_policy() {
        let policy = VotePolicy::new("vp", "Broken", MajorityBase::Expressed, 0.0);
        assert!(MajorityEvaluator::evaluate(&policy, &VoteCounts::default(), 0.0).is_err());
    }
}
