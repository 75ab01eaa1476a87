//! On-disk document layout of the assembly snapshot.

use assembly_domain::{
    AttendanceRoster, Ballot, Decision, ManualTally, Meeting, MeetingId, Motion, MotionId,
    PolicyCatalog, QuorumPolicy, TallyState, VotePolicy,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the engine reads or produces, as one JSON document.
///
/// Policies are kept as plain lists so the file stays easy to write by hand;
/// per-motion and per-meeting records are maps keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblySnapshot {
    pub meetings: Vec<Meeting>,
    pub motions: Vec<Motion>,
    pub quorum_policies: Vec<QuorumPolicy>,
    pub vote_policies: Vec<VotePolicy>,
    pub attendance: BTreeMap<MeetingId, AttendanceRoster>,
    pub ballots: Vec<Ballot>,
    pub tally_drafts: BTreeMap<MotionId, TallyState>,
    pub tallies: BTreeMap<MotionId, ManualTally>,
    pub decisions: BTreeMap<MotionId, Decision>,
}

impl AssemblySnapshot {
    pub fn with_meeting(mut self, meeting: Meeting) -> Self {
        self.meetings.push(meeting);
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motions.push(motion);
        self
    }

    pub fn with_quorum_policy(mut self, policy: QuorumPolicy) -> Self {
        self.quorum_policies.push(policy);
        self
    }

    pub fn with_vote_policy(mut self, policy: VotePolicy) -> Self {
        self.vote_policies.push(policy);
        self
    }

    pub fn with_attendance(
        mut self,
        meeting: impl Into<MeetingId>,
        roster: AttendanceRoster,
    ) -> Self {
        self.attendance.insert(meeting.into(), roster);
        self
    }

    pub fn with_ballot(mut self, ballot: Ballot) -> Self {
        self.ballots.push(ballot);
        self
    }

    /// Policy lists as a catalog (later duplicates replace earlier ones)
    pub fn catalog(&self) -> PolicyCatalog {
        let mut catalog = PolicyCatalog::new();
        for policy in &self.quorum_policies {
            catalog.insert_quorum(policy.clone());
        }
        for policy in &self.vote_policies {
            catalog.insert_vote(policy.clone());
        }
        catalog
    }
}
