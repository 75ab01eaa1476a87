//! Motion Lifecycle use case
//!
//! Opens, closes, edits and deletes motions through the motion state
//! machine. Opening also checks that no sibling motion is open and, unless
//! disabled, that the meeting is live.

use super::shared::{domain_error_conversions, journal, store_error_code};
use crate::config::DecisionConfig;
use crate::ports::assembly_store::{AssemblyStore, StoreError};
use crate::ports::decision_journal::{DecisionJournal, JournalEvent, NoDecisionJournal};
use assembly_domain::{DomainError, Motion, MotionId, MotionPatch, MotionStateMachine, StateGuardError};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during motion lifecycle operations
#[derive(Error, Debug)]
pub enum MotionLifecycleError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

domain_error_conversions!(MotionLifecycleError);

impl MotionLifecycleError {
    pub fn code(&self) -> &'static str {
        match self {
            MotionLifecycleError::Domain(e) => e.code(),
            MotionLifecycleError::Store(e) => store_error_code(e),
        }
    }
}

/// Use case for moving a motion through its lifecycle
pub struct MotionLifecycleUseCase<S: AssemblyStore + 'static> {
    store: Arc<S>,
    journal: Arc<dyn DecisionJournal>,
    config: DecisionConfig,
}

impl<S: AssemblyStore + 'static> MotionLifecycleUseCase<S> {
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

    /// Open voting on a pending motion
    pub async fn open(&self, motion_id: &MotionId) -> Result<Motion, MotionLifecycleError> {
        let mut motion = self.store.motion(motion_id).await?;

        if self.config.require_live_meeting {
            let meeting = self.store.meeting(&motion.meeting_id).await?;
            if !meeting.status.accepts_votes() {
                return Err(StateGuardError::MeetingNotLive {
                    meeting: meeting.id,
                    status: meeting.status,
                }
                .into());
            }
        }

        let siblings = self.store.motions_for(&motion.meeting_id).await?;
        MotionStateMachine::open(&mut motion, &siblings, Utc::now())?;
        self.store.save_motion(motion.clone()).await?;

        journal(self.journal.as_ref(), "motion_opened", "motion", &motion);
        info!("Motion {} opened", motion.id);
        Ok(motion)
    }

    /// Close voting on an open motion
    pub async fn close(&self, motion_id: &MotionId) -> Result<Motion, MotionLifecycleError> {
        let mut motion = self.store.motion(motion_id).await?;
        MotionStateMachine::close(&mut motion, Utc::now())?;
        self.store.save_motion(motion.clone()).await?;

        journal(self.journal.as_ref(), "motion_closed", "motion", &motion);
        info!("Motion {} closed", motion.id);
        Ok(motion)
    }

    /// Change title, description or policy overrides of a pending motion
    pub async fn edit(
        &self,
        motion_id: &MotionId,
        patch: MotionPatch,
    ) -> Result<Motion, MotionLifecycleError> {
        let mut motion = self.store.motion(motion_id).await?;
        MotionStateMachine::edit(&mut motion, patch)?;
        self.store.save_motion(motion.clone()).await?;
        info!("Motion {} edited", motion.id);
        Ok(motion)
    }

    /// Delete a pending motion
    pub async fn delete(&self, motion_id: &MotionId) -> Result<(), MotionLifecycleError> {
        let motion = self.store.motion(motion_id).await?;
        MotionStateMachine::can_delete(&motion)?;
        self.store.delete_motion(&motion.id).await?;

        self.journal.record(JournalEvent::new(
            "motion_deleted",
            json!({ "motion_id": motion.id, "meeting_id": motion.meeting_id }),
        ));
        info!("Motion {} deleted", motion.id);
        Ok(())
    }
}
