//! Motion entity

use crate::core::ids::{MeetingId, MotionId, PolicyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a motion, derived from its timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionStatus {
    Pending,
    Open,
    Closed,
}

impl fmt::Display for MotionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionStatus::Pending => write!(f, "pending"),
            MotionStatus::Open => write!(f, "open"),
            MotionStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for MotionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(MotionStatus::Pending),
            "open" => Ok(MotionStatus::Open),
            "closed" => Ok(MotionStatus::Closed),
            _ => Err(format!(
                "Unknown motion status: {}. Valid: pending, open, closed",
                s
            )),
        }
    }
}

/// A motion put to the vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub id: MotionId,
    pub meeting_id: MeetingId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Quorum policy override
    #[serde(default)]
    pub quorum_policy_id: Option<PolicyId>,
    /// Vote policy override
    #[serde(default)]
    pub vote_policy_id: Option<PolicyId>,
    #[serde(default)]
    pub secret: bool,
    #[serde(default)]
    pub opened_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl Motion {
    pub fn new(
        id: impl Into<MotionId>,
        meeting_id: impl Into<MeetingId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            meeting_id: meeting_id.into(),
            title: title.into(),
            description: String::new(),
            quorum_policy_id: None,
            vote_policy_id: None,
            secret: false,
            opened_at: None,
            closed_at: None,
        }
    }

    pub fn with_quorum_policy(mut self, id: impl Into<PolicyId>) -> Self {
        self.quorum_policy_id = Some(id.into());
        self
    }

    pub fn with_vote_policy(mut self, id: impl Into<PolicyId>) -> Self {
        self.vote_policy_id = Some(id.into());
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn opened(mut self, at: DateTime<Utc>) -> Self {
        self.opened_at = Some(at);
        self
    }

    pub fn closed(mut self, at: DateTime<Utc>) -> Self {
        self.closed_at = Some(at);
        self
    }

    /// `closed` once `closed_at` is set, `open` once `opened_at` is set, else `pending`
    pub fn status(&self) -> MotionStatus {
        match (self.opened_at, self.closed_at) {
            (_, Some(_)) => MotionStatus::Closed,
            (Some(_), None) => MotionStatus::Open,
            (None, None) => MotionStatus::Pending,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status() == MotionStatus::Open
    }
}

/// Changes an operator may apply to a pending motion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the override
    pub quorum_policy_id: Option<Option<PolicyId>>,
    pub vote_policy_id: Option<Option<PolicyId>>,
    pub secret: Option<bool>,
}

impl MotionPatch {
    pub fn is_empty(&self) -> bool {
        self == &MotionPatch::default()
    }

    pub(crate) fn apply_to(self, motion: &mut Motion) {
        if let Some(title) = self.title {
            motion.title = title;
        }
        if let Some(description) = self.description {
            motion.description = description;
        }
        if let Some(quorum) = self.quorum_policy_id {
            motion.quorum_policy_id = quorum;
        }
        if let Some(vote) = self.vote_policy_id {
            motion.vote_policy_id = vote;
        }
        if let Some(secret) = self.secret {
            motion.secret = secret;
        }
    }
}
