//! Meeting entity

use crate::core::ids::{MeetingId, MemberId, PolicyId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a general meeting
///
/// ```text
/// draft <-> scheduled <-> frozen -> live -> closed -> validated -> archived
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    #[default]
    Draft,
    Scheduled,
    Frozen,
    Live,
    Closed,
    Validated,
    Archived,
}

impl MeetingStatus {
    pub const ALL: [MeetingStatus; 7] = [
        MeetingStatus::Draft,
        MeetingStatus::Scheduled,
        MeetingStatus::Frozen,
        MeetingStatus::Live,
        MeetingStatus::Closed,
        MeetingStatus::Validated,
        MeetingStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Draft => "draft",
            MeetingStatus::Scheduled => "scheduled",
            MeetingStatus::Frozen => "frozen",
            MeetingStatus::Live => "live",
            MeetingStatus::Closed => "closed",
            MeetingStatus::Validated => "validated",
            MeetingStatus::Archived => "archived",
        }
    }

    /// Motions can only be opened while the meeting is in session
    pub fn accepts_votes(&self) -> bool {
        matches!(self, MeetingStatus::Live)
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MeetingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeetingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.to_lowercase())
            .ok_or_else(|| {
                format!(
                    "Unknown meeting status: {}. Valid: draft, scheduled, frozen, live, closed, validated, archived",
                    s
                )
            })
    }
}

/// A general meeting
///
/// Status only changes through the meeting state machine; meetings are
/// archived, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: MeetingStatus,
    #[serde(default)]
    pub default_quorum_policy_id: Option<PolicyId>,
    #[serde(default)]
    pub default_vote_policy_id: Option<PolicyId>,
    /// 1 for the first convocation, 2 for the second
    #[serde(default = "first_convocation")]
    pub convocation_no: u8,
    #[serde(default)]
    pub president_id: Option<MemberId>,
}

fn first_convocation() -> u8 {
    1
}

impl Meeting {
    pub fn new(id: impl Into<MeetingId>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            status: MeetingStatus::Draft,
            default_quorum_policy_id: None,
            default_vote_policy_id: None,
            convocation_no: 1,
            president_id: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_status(mut self, status: MeetingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_default_policies(
        mut self,
        quorum: impl Into<PolicyId>,
        vote: impl Into<PolicyId>,
    ) -> Self {
        self.default_quorum_policy_id = Some(quorum.into());
        self.default_vote_policy_id = Some(vote.into());
        self
    }

    /// Set the convocation number (anything past the first counts as the second)
    pub fn with_convocation(mut self, convocation_no: u8) -> Self {
        self.convocation_no = convocation_no.clamp(1, 2);
        self
    }

    pub fn with_president(mut self, member: impl Into<MemberId>) -> Self {
        self.president_id = Some(member.into());
        self
    }

    /// Both default policies are assigned
    pub fn has_default_policies(&self) -> bool {
        let set = |id: &Option<PolicyId>| id.as_ref().is_some_and(|id| !id.is_blank());
        set(&self.default_quorum_policy_id) && set(&self.default_vote_policy_id)
    }

    pub fn is_second_convocation(&self) -> bool {
        self.convocation_no >= 2
    }
}
