//! Manual Tally use case
//!
//! Drives the operator's tally form for a show-of-hands count. Every edit
//! goes through the reconciler and the normalized state is stored as the
//! working draft; only [`save`](ManualTallyUseCase::save) and
//! [`submit`](ManualTallyUseCase::submit) produce a tally that decisions use.

use super::shared::{domain_error_conversions, store_error_code};
use crate::ports::assembly_store::{AssemblyStore, StoreError};
use crate::ports::decision_journal::{DecisionJournal, JournalEvent, NoDecisionJournal};
use assembly_domain::{
    DomainError, ManualTally, MotionId, MotionStateMachine, TallyEdit, TallyReconciler, TallyState,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while editing or saving a manual tally
#[derive(Error, Debug)]
pub enum ManualTallyError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

domain_error_conversions!(ManualTallyError);

impl ManualTallyError {
    pub fn code(&self) -> &'static str {
        match self {
            ManualTallyError::Domain(e) => e.code(),
            ManualTallyError::Store(e) => store_error_code(e),
        }
    }
}

/// Use case for the manual tally form of a motion
pub struct ManualTallyUseCase<S: AssemblyStore + 'static> {
    store: Arc<S>,
    journal: Arc<dyn DecisionJournal>,
}

impl<S: AssemblyStore + 'static> ManualTallyUseCase<S> {
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

    /// Current working state.
    ///
    /// Starts from the saved tally (in manual-total mode) when there is no
    /// draft yet, otherwise from an empty form.
    pub async fn state(&self, motion_id: &MotionId) -> Result<TallyState, ManualTallyError> {
        if let Some(state) = self.store.tally_state(motion_id).await? {
            return Ok(state);
        }
        Ok(match self.store.saved_tally(motion_id).await? {
            Some(saved) => TallyState::new(saved, true),
            None => TallyState::default(),
        })
    }

    /// Apply edits in order. Nothing is stored if any edit is rejected.
    pub async fn edit(
        &self,
        motion_id: &MotionId,
        edits: Vec<TallyEdit>,
    ) -> Result<TallyState, ManualTallyError> {
        let current = self.editable_state(motion_id).await?;
        let next = TallyReconciler::reconcile_all(&current, edits)?;
        debug!("Tally draft for {}: {}", motion_id, next.tally);
        self.store.save_tally_state(motion_id, next).await?;
        Ok(next)
    }

    /// Fill the form with a unanimous vote for
    pub async fn unanimous(&self, motion_id: &MotionId) -> Result<TallyState, ManualTallyError> {
        let current = self.editable_state(motion_id).await?;
        let next = TallyReconciler::unanimous(&current)?;
        self.store.save_tally_state(motion_id, next).await?;
        Ok(next)
    }

    pub async fn set_manual_total_mode(
        &self,
        motion_id: &MotionId,
        enabled: bool,
    ) -> Result<TallyState, ManualTallyError> {
        let current = self.editable_state(motion_id).await?;
        let next = TallyReconciler::set_manual_total_mode(&current, enabled)?;
        self.store.save_tally_state(motion_id, next).await?;
        Ok(next)
    }

    /// Validate the draft and make it the tally that decisions use
    pub async fn save(&self, motion_id: &MotionId) -> Result<ManualTally, ManualTallyError> {
        let state = self.editable_state(motion_id).await?;
        TallyReconciler::validate(&state.tally)?;
        self.persist(motion_id, state.tally).await?;
        Ok(state.tally)
    }

    /// Accept a complete tally in one go (form post or imported file).
    ///
    /// Figures are taken as given: fractional or negative numbers are
    /// rejected rather than clamped, then the usual save-time checks apply.
    pub async fn submit(
        &self,
        motion_id: &MotionId,
        total: f64,
        for_votes: f64,
        against: f64,
        abstain: f64,
    ) -> Result<ManualTally, ManualTallyError> {
        self.editable_state(motion_id).await?;
        let tally = ManualTally::from_submitted(total, for_votes, against, abstain)?;
        TallyReconciler::validate(&tally)?;

        self.store
            .save_tally_state(motion_id, TallyState::new(tally, true))
            .await?;
        self.persist(motion_id, tally).await?;
        Ok(tally)
    }

    /// Working state, refused while the motion has not been opened
    async fn editable_state(&self, motion_id: &MotionId) -> Result<TallyState, ManualTallyError> {
        let motion = self.store.motion(motion_id).await?;
        MotionStateMachine::can_decide(&motion)?;
        self.state(motion_id).await
    }

    async fn persist(&self, motion_id: &MotionId, tally: ManualTally) -> Result<(), ManualTallyError> {
        self.store.save_tally(motion_id, tally).await?;
        self.journal.record(JournalEvent::new(
            "tally_saved",
            json!({ "motion_id": motion_id, "tally": tally }),
        ));
        info!("Manual tally saved for {}: {}", motion_id, tally);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_store::{MemoryStore, RecordingJournal};
    use assembly_domain::{Motion, TallyField, ValidationError};
    use chrono::Utc;

    fn store() -> Arc<MemoryStore> {
        Arc::new(
            MemoryStore::new()
                .with_motion(Motion::new("m1", "agm", "Budget").opened(Utc::now()))
                .with_motion(Motion::new("m2", "agm", "Not opened")),
        )
    }

    fn id(s: &str) -> MotionId {
        MotionId::new(s)
    }

    #[tokio::test]
    async fn test_edits_reconcile_and_persist_draft() {
        let store = store();
        let use_case = ManualTallyUseCase::new(store.clone());

        let state = use_case
            .edit(
                &id("m1"),
                vec![
                    TallyEdit::new(TallyField::Total, 50),
                    TallyEdit::new(TallyField::Against, 10),
                    TallyEdit::new(TallyField::Abstain, 5),
                ],
            )
            .await
            .unwrap();
        assert!(state.manual_total_mode);
        assert_eq!(state.tally, ManualTally::new(50, 35, 10, 5));

        // draft is reloaded, not recomputed
        assert_eq!(use_case.state(&id("m1")).await.unwrap(), state);
        // but nothing is saved yet
        assert_eq!(store.saved_tally(&id("m1")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejected_edit_keeps_previous_draft() {
        let use_case = ManualTallyUseCase::new(store());
        let before = use_case
            .edit(&id("m1"), vec![TallyEdit::new(TallyField::Total, 20)])
            .await
            .unwrap();

        let err = use_case
            .edit(&id("m1"), vec![TallyEdit::new(TallyField::For, 3)])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "derived_field");
        assert_eq!(use_case.state(&id("m1")).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_unanimous_then_save() {
        let store = store();
        let journal = Arc::new(RecordingJournal::default());
        let use_case = ManualTallyUseCase::new(store.clone()).with_journal(journal.clone());

        use_case
            .edit(&id("m1"), vec![TallyEdit::new(TallyField::Total, 20)])
            .await
            .unwrap();
        let state = use_case.unanimous(&id("m1")).await.unwrap();
        assert_eq!(state.tally, ManualTally::new(20, 20, 0, 0));

        let saved = use_case.save(&id("m1")).await.unwrap();
        assert_eq!(saved, ManualTally::new(20, 20, 0, 0));
        assert_eq!(store.saved_tally(&id("m1")).await.unwrap(), Some(saved));
        assert_eq!(journal.event_types(), vec!["tally_saved"]);
    }

    #[tokio::test]
    async fn test_save_rejects_empty_tally() {
        let err = ManualTallyUseCase::new(store())
            .save(&id("m1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ManualTallyError::Domain(DomainError::Validation(ValidationError::NonPositiveTotal))
        ));
    }

    #[tokio::test]
    async fn test_leaving_manual_total_mode_recomputes_total() {
        let use_case = ManualTallyUseCase::new(store());
        use_case
            .edit(
                &id("m1"),
                vec![
                    TallyEdit::new(TallyField::Total, 50),
                    TallyEdit::new(TallyField::Against, 10),
                ],
            )
            .await
            .unwrap();
        let state = use_case.set_manual_total_mode(&id("m1"), false).await.unwrap();
        assert!(!state.manual_total_mode);
        assert_eq!(state.tally.sum(), Some(state.tally.total));
    }

    #[tokio::test]
    async fn test_submit_sum_mismatch() {
        let store = store();
        let err = ManualTallyUseCase::new(store.clone())
            .submit(&id("m1"), 50.0, 30.0, 10.0, 5.0)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ManualTallyError::Domain(DomainError::Validation(ValidationError::SumMismatch {
                total: 50,
                sum: 45
            }))
        ));
        assert_eq!(store.saved_tally(&id("m1")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_submit_rejects_fractional_figures() {
        let err = ManualTallyUseCase::new(store())
            .submit(&id("m1"), 10.0, 4.5, 5.5, 0.0)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "not_an_integer");
    }

    #[tokio::test]
    async fn test_submit_saves_and_updates_draft() {
        let use_case = ManualTallyUseCase::new(store());
        let tally = use_case
            .submit(&id("m1"), 40.0, 25.0, 10.0, 5.0)
            .await
            .unwrap();
        let state = use_case.state(&id("m1")).await.unwrap();
        assert_eq!(state.tally, tally);
        assert!(state.manual_total_mode);
    }

    #[tokio::test]
    async fn test_pending_motion_refused() {
        let err = ManualTallyUseCase::new(store())
            .edit(&id("m2"), vec![TallyEdit::new(TallyField::Total, 5)])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "motion_not_started");
    }
}
