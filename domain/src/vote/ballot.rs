//! Ballots and vote counts

use crate::core::ids::{MemberId, MotionId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A member's choice on a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallotValue {
    For,
    Against,
    Abstain,
}

impl fmt::Display for BallotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallotValue::For => write!(f, "for"),
            BallotValue::Against => write!(f, "against"),
            BallotValue::Abstain => write!(f, "abstain"),
        }
    }
}

/// How a ballot was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallotSource {
    #[default]
    Electronic,
    /// Entered by an operator on behalf of the member
    Override,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub motion_id: MotionId,
    pub member_id: MemberId,
    pub value: BallotValue,
    #[serde(default)]
    pub source: BallotSource,
}

impl Ballot {
    pub fn new(
        motion_id: impl Into<MotionId>,
        member_id: impl Into<MemberId>,
        value: BallotValue,
    ) -> Self {
        Self {
            motion_id: motion_id.into(),
            member_id: member_id.into(),
            value,
            source: BallotSource::Electronic,
        }
    }

    pub fn by_override(mut self) -> Self {
        self.source = BallotSource::Override;
        self
    }
}

/// Resolved for/against/abstain figures, as head counts or weights
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VoteCounts {
    #[serde(rename = "for")]
    pub for_votes: f64,
    pub against: f64,
    pub abstain: f64,
}

impl VoteCounts {
    pub fn new(for_votes: f64, against: f64, abstain: f64) -> Self {
        Self {
            for_votes,
            against,
            abstain,
        }
    }

    pub fn cast(&self) -> f64 {
        self.for_votes + self.against + self.abstain
    }

    fn add(&mut self, value: BallotValue, weight: f64) {
        match value {
            BallotValue::For => self.for_votes += weight,
            BallotValue::Against => self.against += weight,
            BallotValue::Abstain => self.abstain += weight,
        }
    }
}

/// Reduces ballots to vote counts
pub struct BallotBox;

impl BallotBox {
    /// Latest ballot per member for a motion; later entries replace earlier ones
    pub fn latest<'a>(ballots: &'a [Ballot], motion_id: &MotionId) -> Vec<&'a Ballot> {
        let mut order: Vec<&MemberId> = Vec::new();
        let mut latest: HashMap<&MemberId, &Ballot> = HashMap::new();
        for ballot in ballots.iter().filter(|b| &b.motion_id == motion_id) {
            if latest.insert(&ballot.member_id, ballot).is_none() {
                order.push(&ballot.member_id);
            }
        }
        order.into_iter().filter_map(|m| latest.get(m).copied()).collect()
    }

    /// One vote per member
    pub fn count_heads(ballots: &[Ballot], motion_id: &MotionId) -> VoteCounts {
        Self::count_weighted(ballots, motion_id, |_| 1.0)
    }

    /// Each member's latest ballot weighted by `weight`
    pub fn count_weighted(
        ballots: &[Ballot],
        motion_id: &MotionId,
        weight: impl Fn(&MemberId) -> f64,
    ) -> VoteCounts {
        let mut counts = VoteCounts::default();
        for ballot in Self::latest(ballots, motion_id) {
            let w = weight(&ballot.member_id);
            if w.is_finite() && w > 0.0 {
                counts.add(ballot.value, w);
            }
        }
        counts
    }
}
