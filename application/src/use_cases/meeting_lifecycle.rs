//! Meeting Lifecycle use case
//!
//! Gathers the readiness checklist of a meeting from the store and runs the
//! meeting state machine on it. [`check`](MeetingLifecycleUseCase::check)
//! only reports; [`transition`](MeetingLifecycleUseCase::transition) also
//! applies the new status when nothing blocks it.

use super::shared::{domain_error_conversions, store_error_code};
use crate::ports::assembly_store::{AssemblyStore, StoreError};
use crate::ports::decision_journal::{DecisionJournal, JournalEvent, NoDecisionJournal};
use assembly_domain::{
    DomainError, Meeting, MeetingId, MeetingStateMachine, MeetingStatus, ReadinessChecklist,
    TransitionCheck,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during meeting lifecycle operations
#[derive(Error, Debug)]
pub enum MeetingLifecycleError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

domain_error_conversions!(MeetingLifecycleError);

impl MeetingLifecycleError {
    pub fn code(&self) -> &'static str {
        match self {
            MeetingLifecycleError::Domain(e) => e.code(),
            MeetingLifecycleError::Store(e) => store_error_code(e),
        }
    }
}

/// Use case for moving a meeting through its lifecycle
pub struct MeetingLifecycleUseCase<S: AssemblyStore + 'static> {
    store: Arc<S>,
    journal: Arc<dyn DecisionJournal>,
}

impl<S: AssemblyStore + 'static> MeetingLifecycleUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            journal: Arc::new(NoDecisionJournal),
        }
    }

    pub fn with_journal(mut self, journal: Arc<dyn DecisionJournal>) -> Self {
        self.journal = journal;
        self
    }

    /// Readiness facts of a meeting as currently stored
    pub async fn checklist(
        &self,
        meeting: &Meeting,
    ) -> Result<ReadinessChecklist, MeetingLifecycleError> {
        let roster = self.store.roster(&meeting.id).await?;
        let motions = self.store.motions_for(&meeting.id).await?;
        let catalog = self.store.policy_catalog().await?;

        let policies_assigned = meeting.has_default_policies()
            && meeting
                .default_quorum_policy_id
                .as_ref()
                .is_some_and(|id| catalog.quorum_policy(id).is_ok())
            && meeting
                .default_vote_policy_id
                .as_ref()
                .is_some_and(|id| catalog.vote_policy(id).is_ok());

        Ok(ReadinessChecklist {
            members_registered: !roster.is_empty(),
            attendance_recorded: roster.is_recorded(),
            motions_created: !motions.is_empty(),
            policies_assigned,
            president_designated: meeting.president_id.as_ref().is_some_and(|p| !p.is_blank()),
            no_open_motion: !motions.iter().any(|m| m.is_open()),
        })
    }

    /// Whether the meeting may move to `target`, with every blocking reason
    pub async fn check(
        &self,
        meeting_id: &MeetingId,
        target: MeetingStatus,
    ) -> Result<TransitionCheck, MeetingLifecycleError> {
        let meeting = self.store.meeting(meeting_id).await?;
        let checklist = self.checklist(&meeting).await?;
        Ok(MeetingStateMachine::can_transition(
            meeting.status,
            target,
            &checklist,
        ))
    }

    /// Move the meeting to `target`, or fail with the blocking reasons
    pub async fn transition(
        &self,
        meeting_id: &MeetingId,
        target: MeetingStatus,
    ) -> Result<Meeting, MeetingLifecycleError> {
        let mut meeting = self.store.meeting(meeting_id).await?;
        let checklist = self.checklist(&meeting).await?;
        let check = MeetingStateMachine::can_transition(meeting.status, target, &checklist);

        if !check.ok {
            warn!(
                "Meeting {} cannot move from {} to {} ({} blocker(s))",
                meeting.id,
                check.from,
                check.to,
                check.reasons.len()
            );
        }
        check.into_result()?;

        let from = meeting.status;
        meeting.status = target;
        self.store.save_meeting(meeting.clone()).await?;

        self.journal.record(JournalEvent::new(
            "meeting_transitioned",
            json!({ "meeting_id": meeting.id, "from": from, "to": target }),
        ));
        info!("Meeting {} moved from {} to {}", meeting.id, from, target);
        Ok(meeting)
    }
}
