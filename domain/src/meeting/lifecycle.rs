//! Meeting state machine
//!
//! ```text
//! draft <-> scheduled <-> frozen -> live -> closed -> validated -> archived
//! ```
//!
//! Forward edges may require readiness checklist items; backward edges
//! (`scheduled -> draft`, `frozen -> scheduled`) never do. Who may trigger a
//! transition is decided elsewhere.

use super::checklist::{ChecklistItem, ReadinessChecklist};
use super::entities::MeetingStatus;
use crate::core::error::StateGuardError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a meeting transition is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "item", rename_all = "snake_case")]
pub enum TransitionBlocker {
    /// The target is not adjacent to the current status
    NotAdjacent,
    /// A required checklist item is not satisfied
    Missing(ChecklistItem),
}

impl fmt::Display for TransitionBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionBlocker::NotAdjacent => write!(f, "not an allowed transition"),
            TransitionBlocker::Missing(item) => write!(f, "missing {}", item),
        }
    }
}

/// Outcome of [`MeetingStateMachine::can_transition`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionCheck {
    pub from: MeetingStatus,
    pub to: MeetingStatus,
    pub ok: bool,
    pub reasons: Vec<TransitionBlocker>,
}

impl TransitionCheck {
    pub fn into_result(self) -> Result<(), StateGuardError> {
        if self.ok {
            Ok(())
        } else {
            Err(StateGuardError::MeetingTransitionBlocked {
                from: self.from,
                to: self.to,
                reasons: self.reasons,
            })
        }
    }
}

pub struct MeetingStateMachine;

impl MeetingStateMachine {
    /// Checklist items a transition requires, or `None` when the edge doesn't exist
    pub fn requirements(from: MeetingStatus, to: MeetingStatus) -> Option<&'static [ChecklistItem]> {
        use ChecklistItem::*;
        use MeetingStatus::*;

        match (from, to) {
            (Draft, Scheduled) => Some(&[MembersRegistered, PoliciesAssigned]),
            (Scheduled, Draft) => Some(&[]),
            (Scheduled, Frozen) => Some(&[
                MembersRegistered,
                MotionsCreated,
                PoliciesAssigned,
                PresidentDesignated,
            ]),
            (Frozen, Scheduled) => Some(&[]),
            (Frozen, Live) => Some(&[AttendanceRecorded, PresidentDesignated]),
            (Live, Closed) => Some(&[NoOpenMotion]),
            (Closed, Validated) => Some(&[]),
            (Validated, Archived) => Some(&[]),
            _ => None,
        }
    }

    /// Statuses reachable from `from` in one step
    pub fn next_statuses(from: MeetingStatus) -> Vec<MeetingStatus> {
        MeetingStatus::ALL
            .into_iter()
            .filter(|to| Self::requirements(from, *to).is_some())
            .collect()
    }

    /// Pure transition predicate.
    ///
    /// Every unmet requirement is reported, not only the first.
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_domain::meeting::{ChecklistItem, MeetingStateMachine, MeetingStatus, ReadinessChecklist};
    ///
    /// let checklist = ReadinessChecklist::complete().without(ChecklistItem::AttendanceRecorded);
    /// let check = MeetingStateMachine::can_transition(MeetingStatus::Frozen, MeetingStatus::Live, &checklist);
    /// assert!(!check.ok);
    /// assert_eq!(check.reasons.len(), 1);
    /// ```
    pub fn can_transition(
        from: MeetingStatus,
        to: MeetingStatus,
        checklist: &ReadinessChecklist,
    ) -> TransitionCheck {
        let reasons = match Self::requirements(from, to) {
            None => vec![TransitionBlocker::NotAdjacent],
            Some(required) => checklist
                .missing(required)
                .into_iter()
                .map(TransitionBlocker::Missing)
                .collect(),
        };

        TransitionCheck {
            from,
            to,
            ok: reasons.is_empty(),
            reasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::entities::MeetingStatus::*;

    #[test]
    fn test_full_forward_path_with_complete_checklist() {
        let checklist = ReadinessChecklist::complete();
        let path = [Draft, Scheduled, Frozen, Live, Closed, Validated, Archived];
        for pair in path.windows(2) {
            let check = MeetingStateMachine::can_transition(pair[0], pair[1], &checklist);
            assert!(check.ok, "{} -> {} should be allowed", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_bidirectional_edges_before_live() {
        let empty = ReadinessChecklist::default();
        assert!(MeetingStateMachine::can_transition(Scheduled, Draft, &empty).ok);
        assert!(MeetingStateMachine::can_transition(Frozen, Scheduled, &empty).ok);
    }

    #[test]
    fn test_no_way_back_after_live() {
        let checklist = ReadinessChecklist::complete();
        for (from, to) in [(Live, Frozen), (Closed, Live), (Validated, Closed), (Archived, Validated)] {
            let check = MeetingStateMachine::can_transition(from, to, &checklist);
            assert!(!check.ok);
            assert_eq!(check.reasons, vec![TransitionBlocker::NotAdjacent]);
        }
    }

    #[test]
    fn test_non_adjacent_forward_jump_refused() {
        let check =
            MeetingStateMachine::can_transition(Draft, Live, &ReadinessChecklist::complete());
        assert!(!check.ok);
        assert!(MeetingStateMachine::can_transition(Live, Live, &ReadinessChecklist::complete())
            .reasons
            .contains(&TransitionBlocker::NotAdjacent));
    }

    #[test]
    fn test_all_missing_items_reported() {
        let check =
            MeetingStateMachine::can_transition(Scheduled, Frozen, &ReadinessChecklist::default());
        assert_eq!(
            check.reasons,
            vec![
                TransitionBlocker::Missing(ChecklistItem::MembersRegistered),
                TransitionBlocker::Missing(ChecklistItem::MotionsCreated),
                TransitionBlocker::Missing(ChecklistItem::PoliciesAssigned),
                TransitionBlocker::Missing(ChecklistItem::PresidentDesignated),
            ]
        );
    }

    #[test]
    fn test_closing_blocked_by_open_motion() {
        let checklist = ReadinessChecklist::complete().without(ChecklistItem::NoOpenMotion);
        let err = MeetingStateMachine::can_transition(Live, Closed, &checklist)
            .into_result()
            .unwrap_err();
        assert_eq!(err.code(), "meeting_transition_blocked");
    }

    #[test]
    fn test_next_statuses() {
        assert_eq!(MeetingStateMachine::next_statuses(Scheduled), vec![Draft, Frozen]);
        assert_eq!(MeetingStateMachine::next_statuses(Live), vec![Closed]);
        assert!(MeetingStateMachine::next_statuses(Archived).is_empty());
    }
}
