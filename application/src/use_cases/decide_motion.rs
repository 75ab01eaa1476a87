//! Decide Motion use case
//!
//! Runs the full decision pipeline for one motion and records the result.
//!
//! ```text
//! motion + meeting ─▶ resolve policies ─▶ catalog lookup
//!   roster ─▶ aggregate (quorum flags) ─▶ QuorumEvaluator ─┐
//!   saved tally | ballots ─▶ MajorityEvaluator ────────────┤
//!                                                          ▼
//!                                     DecisionConsolidator ─▶ store + journal
//! ```

use super::shared::{domain_error_conversions, journal, store_error_code};
use crate::config::DecisionConfig;
use crate::ports::assembly_store::{AssemblyStore, StoreError};
use crate::ports::decision_journal::{DecisionJournal, NoDecisionJournal};
use assembly_domain::{
    AttendanceRoster, BallotBox, Decision, DecisionConsolidator, DomainError, MajorityEvaluator,
    MajorityResult, MeetingId, MotionId, MotionStateMachine, MotionStatus, PolicyResolution,
    PolicyResolver, QuorumEvaluator, QuorumResult, TallySource, VoteCounts, VotePolicy,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while deciding a motion
#[derive(Error, Debug)]
pub enum DecideMotionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

domain_error_conversions!(DecideMotionError);

impl DecideMotionError {
    pub fn code(&self) -> &'static str {
        match self {
            DecideMotionError::Domain(e) => e.code(),
            DecideMotionError::Store(e) => store_error_code(e),
        }
    }
}

/// Everything the pipeline computed on the way to the decision
#[derive(Debug, Clone, Serialize)]
pub struct DecideMotionOutput {
    pub decision: Decision,
    pub resolution: PolicyResolution,
    pub quorum: QuorumResult,
    pub majority: MajorityResult,
}

/// Use case for computing and recording the decision on a motion
pub struct DecideMotionUseCase<S: AssemblyStore + 'static> {
    store: Arc<S>,
    journal: Arc<dyn DecisionJournal>,
    config: DecisionConfig,
}

impl<S: AssemblyStore + 'static> DecideMotionUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            journal: Arc::new(NoDecisionJournal),
            config: DecisionConfig::default(),
        }
    }

    pub fn with_journal(mut self, journal: Arc<dyn DecisionJournal>) -> Self {
        self.journal = journal;
        self
    }

    pub fn with_config(mut self, config: DecisionConfig) -> Self {
        self.config = config;
        self
    }

    /// Effective policies of a motion, without evaluating anything
    pub async fn resolve(&self, motion_id: &MotionId) -> Result<PolicyResolution, DecideMotionError> {
        let motion = self.store.motion(motion_id).await?;
        let meeting = self.store.meeting(&motion.meeting_id).await?;
        Ok(PolicyResolver::resolve(&motion, &meeting))
    }

    /// Decide one motion. Motions still pending are refused.
    pub async fn execute(&self, motion_id: &MotionId) -> Result<DecideMotionOutput, DecideMotionError> {
        let motion = self.store.motion(motion_id).await?;
        MotionStateMachine::can_decide(&motion)?;

        let meeting = self.store.meeting(&motion.meeting_id).await?;
        let resolution = PolicyResolver::resolve(&motion, &meeting);
        let catalog = self.store.policy_catalog().await?;
        let (quorum_policy, vote_policy) = catalog.effective(&resolution)?;

        debug!(
            "Motion {}: quorum policy {} (override: {}), vote policy {} (override: {})",
            motion.id,
            quorum_policy.id,
            resolution.quorum.is_override,
            vote_policy.id,
            resolution.vote.is_override
        );

        let roster = self.store.roster(&meeting.id).await?;
        roster.validate_proxies()?;

        let attendance = roster.aggregate_for(quorum_policy);
        let quorum = QuorumEvaluator::evaluate(quorum_policy, &attendance, meeting.convocation_no)?;
        debug!(
            "Quorum for {}: ratio {:.4} (threshold {}), met: {}",
            motion.id, quorum.ratio, quorum.threshold, quorum.met
        );

        let (source, counts) = self.tally_for(&motion.id, vote_policy, &roster).await?;
        // a manual tally is a show-of-hands count, so its base is a head count too
        let eligible_total = if vote_policy.weighted && source == TallySource::Electronic {
            attendance.eligible_weight
        } else {
            attendance.eligible_count as f64
        };
        let majority = MajorityEvaluator::evaluate(vote_policy, &counts, eligible_total)?;
        debug!(
            "Majority for {} ({} tally): ratio {:.4} (threshold {}), met: {}",
            motion.id, source, majority.ratio, majority.threshold, majority.met
        );

        let decision =
            DecisionConsolidator::consolidate(motion.id.clone(), &quorum, &majority, source);
        self.store.save_decision(decision.clone()).await?;
        journal(
            self.journal.as_ref(),
            "decision_recorded",
            "decision",
            &decision,
        );

        info!(
            "Motion {} {} ({})",
            decision.motion_id, decision.status, decision.reason
        );

        Ok(DecideMotionOutput {
            decision,
            resolution,
            quorum,
            majority,
        })
    }

    /// Decide every motion of a meeting that has been opened, in order.
    ///
    /// Stops at the first failure so that a misconfigured policy is not
    /// silently skipped.
    pub async fn execute_for_meeting(
        &self,
        meeting_id: &MeetingId,
    ) -> Result<Vec<DecideMotionOutput>, DecideMotionError> {
        let motions = self.store.motions_for(meeting_id).await?;
        info!(
            "Deciding {} motion(s) of meeting {}",
            motions.len(),
            meeting_id
        );

        let mut outputs = Vec::new();
        for motion in motions {
            if motion.status() == MotionStatus::Pending {
                debug!("Skipping pending motion {}", motion.id);
                continue;
            }
            outputs.push(self.execute(&motion.id).await?);
        }
        Ok(outputs)
    }

    /// Saved manual tally when preferred and present, otherwise the ballots
    async fn tally_for(
        &self,
        motion_id: &MotionId,
        vote_policy: &VotePolicy,
        roster: &AttendanceRoster,
    ) -> Result<(TallySource, VoteCounts), DecideMotionError> {
        if self.config.prefer_manual_tally
            && let Some(tally) = self.store.saved_tally(motion_id).await?
        {
            return Ok((TallySource::Manual, tally.to_counts()));
        }

        let ballots = self.store.ballots(motion_id).await?;
        let counts = if vote_policy.weighted {
            BallotBox::count_weighted(&ballots, motion_id, |member| roster.voting_weight(member))
        } else {
            BallotBox::count_heads(&ballots, motion_id)
        };
        Ok((TallySource::Electronic, counts))
    }
}
