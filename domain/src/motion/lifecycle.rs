//! Motion state machine
//!
//! `pending -> open -> closed`, one way only. At most one motion per meeting
//! may be open; opening another fails instead of closing the current one.
//! Content edits and deletion are only allowed while pending.

use super::entities::{Motion, MotionPatch, MotionStatus};
use crate::core::error::StateGuardError;
use chrono::{DateTime, Utc};

pub struct MotionStateMachine;

impl MotionStateMachine {
    /// Check a status transition.
    ///
    /// `siblings` are the other motions of the same meeting; the motion itself
    /// may appear among them and is ignored.
    pub fn can_transition(
        motion: &Motion,
        target: MotionStatus,
        siblings: &[Motion],
    ) -> Result<(), StateGuardError> {
        let from = motion.status();
        match (from, target) {
            (MotionStatus::Pending, MotionStatus::Open) => {
                match siblings
                    .iter()
                    .find(|m| m.id != motion.id && m.meeting_id == motion.meeting_id && m.is_open())
                {
                    Some(open) => Err(StateGuardError::OpenMotionConflict {
                        motion: motion.id.clone(),
                        open_motion: open.id.clone(),
                    }),
                    None => Ok(()),
                }
            }
            (MotionStatus::Open, MotionStatus::Closed) => Ok(()),
            _ => Err(StateGuardError::InvalidMotionTransition {
                motion: motion.id.clone(),
                from,
                to: target,
            }),
        }
    }

    pub fn open(
        motion: &mut Motion,
        siblings: &[Motion],
        at: DateTime<Utc>,
    ) -> Result<(), StateGuardError> {
        Self::can_transition(motion, MotionStatus::Open, siblings)?;
        motion.opened_at = Some(at);
        Ok(())
    }

    pub fn close(motion: &mut Motion, at: DateTime<Utc>) -> Result<(), StateGuardError> {
        Self::can_transition(motion, MotionStatus::Closed, &[])?;
        motion.closed_at = Some(at);
        Ok(())
    }

    /// Title, description, overrides and deletion are only open while pending
    pub fn can_edit(motion: &Motion) -> Result<(), StateGuardError> {
        match motion.status() {
            MotionStatus::Pending => Ok(()),
            state => Err(StateGuardError::MotionNotPending {
                motion: motion.id.clone(),
                state,
            }),
        }
    }

    pub fn edit(motion: &mut Motion, patch: MotionPatch) -> Result<(), StateGuardError> {
        Self::can_edit(motion)?;
        patch.apply_to(motion);
        Ok(())
    }

    pub fn can_delete(motion: &Motion) -> Result<(), StateGuardError> {
        Self::can_edit(motion)
    }

    /// Results can only be computed once voting has started
    pub fn can_decide(motion: &Motion) -> Result<(), StateGuardError> {
        match motion.status() {
            MotionStatus::Pending => Err(StateGuardError::MotionNotStarted {
                motion: motion.id.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(id: &str) -> Motion {
        Motion::new(id, "agm", format!("Motion {}", id))
    }

    #[test]
    fn test_open_then_close() {
        let mut motion = pending("m1");
        MotionStateMachine::open(&mut motion, &[], Utc::now()).unwrap();
        assert_eq!(motion.status(), MotionStatus::Open);
        MotionStateMachine::close(&mut motion, Utc::now()).unwrap();
        assert_eq!(motion.status(), MotionStatus::Closed);
    }

    #[test]
    fn test_opening_while_another_is_open_conflicts() {
        let open = pending("m1").opened(Utc::now());
        let mut next = pending("m2");
        let err = MotionStateMachine::open(&mut next, &[open.clone()], Utc::now()).unwrap_err();
        assert_eq!(
            err,
            StateGuardError::OpenMotionConflict {
                motion: "m2".into(),
                open_motion: "m1".into(),
            }
        );
        // the open motion is left untouched
        assert!(open.is_open());
        assert_eq!(next.status(), MotionStatus::Pending);
    }

    #[test]
    fn test_open_motion_in_other_meeting_does_not_conflict() {
        let mut elsewhere = Motion::new("x1", "other-agm", "Elsewhere");
        elsewhere.opened_at = Some(Utc::now());
        let mut motion = pending("m2");
        assert!(MotionStateMachine::open(&mut motion, &[elsewhere], Utc::now()).is_ok());
    }

    #[test]
    fn test_self_in_siblings_is_ignored() {
        let motion = pending("m1");
        assert!(
            MotionStateMachine::can_transition(&motion, MotionStatus::Open, &[motion.clone()])
                .is_ok()
        );
    }

    #[test]
    fn test_no_reopening() {
        let closed = pending("m1").opened(Utc::now()).closed(Utc::now());
        let err =
            MotionStateMachine::can_transition(&closed, MotionStatus::Open, &[]).unwrap_err();
        assert_eq!(err.code(), "invalid_motion_transition");

        let never_opened = pending("m2");
        assert!(
            MotionStateMachine::can_transition(&never_opened, MotionStatus::Closed, &[]).is_err()
        );
    }

    #[test]
    fn test_edit_closed_motion_always_fails() {
        let mut closed = pending("m1").opened(Utc::now()).closed(Utc::now());
        for patch in [
            MotionPatch::default(),
            MotionPatch {
                title: Some("New title".to_string()),
                ..Default::default()
            },
            MotionPatch {
                vote_policy_id: Some(None),
                ..Default::default()
            },
        ] {
            let err = MotionStateMachine::edit(&mut closed, patch).unwrap_err();
            assert_eq!(
                err,
                StateGuardError::MotionNotPending {
                    motion: "m1".into(),
                    state: MotionStatus::Closed,
                }
            );
        }
        assert_eq!(closed.title, "Motion m1");
    }

    #[test]
    fn test_closed_without_opened_at_still_guarded() {
        let mut motion = pending("m1");
        motion.closed_at = Some(Utc::now());
        assert!(MotionStateMachine::can_edit(&motion).is_err());
        assert!(MotionStateMachine::can_delete(&motion).is_err());
    }

    #[test]
    fn test_edit_and_delete_open_motion_fail() {
        let open = pending("m1").opened(Utc::now());
        let err = MotionStateMachine::can_delete(&open).unwrap_err();
        assert!(err.to_string().contains("open"));
    }

    #[test]
    fn test_edit_pending_motion() {
        let mut motion = pending("m1");
        MotionStateMachine::edit(
            &mut motion,
            MotionPatch {
                quorum_policy_id: Some(Some("qp-special".into())),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(motion.quorum_policy_id, Some("qp-special".into()));
    }

    #[test]
    fn test_can_decide() {
        assert!(MotionStateMachine::can_decide(&pending("m1")).is_err());
        assert!(MotionStateMachine::can_decide(&pending("m1").opened(Utc::now())).is_ok());
    }
}
