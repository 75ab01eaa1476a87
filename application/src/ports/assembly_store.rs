//! Assembly store port
//!
//! Defines how use cases load and persist meetings, motions, policies,
//! attendance, ballots, tallies and decisions. The engine itself never
//! touches storage; adapters live in the infrastructure layer.

use assembly_domain::{
    AttendanceRoster, Ballot, Decision, ManualTally, Meeting, MeetingId, Motion, MotionId,
    PolicyCatalog, TallyState,
};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt data: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn meeting_not_found(id: &MeetingId) -> Self {
        Self::NotFound {
            kind: "meeting",
            id: id.to_string(),
        }
    }

    pub fn motion_not_found(id: &MotionId) -> Self {
        Self::NotFound {
            kind: "motion",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Persistence for everything the decision engine reads or produces
///
/// Lookups of single entities fail with [`StoreError::NotFound`]; optional
/// per-motion records (tally, decision) return `None` when absent.
#[async_trait]
pub trait AssemblyStore: Send + Sync {
    // ==================== Meetings ====================

    async fn meeting(&self, id: &MeetingId) -> Result<Meeting, StoreError>;

    async fn save_meeting(&self, meeting: Meeting) -> Result<(), StoreError>;

    /// Attendance and proxies of a meeting (empty when nothing is recorded)
    async fn roster(&self, meeting: &MeetingId) -> Result<AttendanceRoster, StoreError>;

    // ==================== Motions ====================

    async fn motion(&self, id: &MotionId) -> Result<Motion, StoreError>;

    /// All motions of a meeting, in creation order
    async fn motions_for(&self, meeting: &MeetingId) -> Result<Vec<Motion>, StoreError>;

    async fn save_motion(&self, motion: Motion) -> Result<(), StoreError>;

    /// Remove a motion together with its ballots, tallies and decision
    async fn delete_motion(&self, id: &MotionId) -> Result<(), StoreError>;

    // ==================== Policies ====================

    async fn policy_catalog(&self) -> Result<PolicyCatalog, StoreError>;

    // ==================== Votes ====================

    /// Ballots of a motion in the order they were cast
    async fn ballots(&self, motion: &MotionId) -> Result<Vec<Ballot>, StoreError>;

    /// Working state of the manual tally form
    async fn tally_state(&self, motion: &MotionId) -> Result<Option<TallyState>, StoreError>;

    async fn save_tally_state(
        &self,
        motion: &MotionId,
        state: TallyState,
    ) -> Result<(), StoreError>;

    /// Last validated manual tally
    async fn saved_tally(&self, motion: &MotionId) -> Result<Option<ManualTally>, StoreError>;

    async fn save_tally(&self, motion: &MotionId, tally: ManualTally) -> Result<(), StoreError>;

    // ==================== Decisions ====================

    async fn decision(&self, motion: &MotionId) -> Result<Option<Decision>, StoreError>;

    async fn save_decision(&self, decision: Decision) -> Result<(), StoreError>;
}
