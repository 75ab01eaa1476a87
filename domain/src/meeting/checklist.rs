//! Readiness checklist consulted by meeting transitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// One readiness condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistItem {
    MembersRegistered,
    AttendanceRecorded,
    MotionsCreated,
    PoliciesAssigned,
    PresidentDesignated,
    NoOpenMotion,
}

impl ChecklistItem {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistItem::MembersRegistered => "members_registered",
            ChecklistItem::AttendanceRecorded => "attendance_recorded",
            ChecklistItem::MotionsCreated => "motions_created",
            ChecklistItem::PoliciesAssigned => "policies_assigned",
            ChecklistItem::PresidentDesignated => "president_designated",
            ChecklistItem::NoOpenMotion => "no_open_motion",
        }
    }
}

impl fmt::Display for ChecklistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readiness facts gathered by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadinessChecklist {
    pub members_registered: bool,
    pub attendance_recorded: bool,
    pub motions_created: bool,
    pub policies_assigned: bool,
    pub president_designated: bool,
    pub no_open_motion: bool,
}

impl ReadinessChecklist {
    /// A checklist with every item satisfied
    pub fn complete() -> Self {
        Self {
            members_registered: true,
            attendance_recorded: true,
            motions_created: true,
            policies_assigned: true,
            president_designated: true,
            no_open_motion: true,
        }
    }

    pub fn is_satisfied(&self, item: ChecklistItem) -> bool {
        match item {
            ChecklistItem::MembersRegistered => self.members_registered,
            ChecklistItem::AttendanceRecorded => self.attendance_recorded,
            ChecklistItem::MotionsCreated => self.motions_created,
            ChecklistItem::PoliciesAssigned => self.policies_assigned,
            ChecklistItem::PresidentDesignated => self.president_designated,
            ChecklistItem::NoOpenMotion => self.no_open_motion,
        }
    }

    /// Items from `required` that are not satisfied, in order
    pub fn missing(&self, required: &[ChecklistItem]) -> Vec<ChecklistItem> {
        required
            .iter()
            .copied()
            .filter(|item| !self.is_satisfied(*item))
            .collect()
    }

    pub fn without(mut self, item: ChecklistItem) -> Self {
        match item {
            ChecklistItem::MembersRegistered => self.members_registered = false,
            ChecklistItem::AttendanceRecorded => self.attendance_recorded = false,
            ChecklistItem::MotionsCreated => self.motions_created = false,
            ChecklistItem::PoliciesAssigned => self.policies_assigned = false,
            ChecklistItem::PresidentDesignated => self.president_designated = false,
            ChecklistItem::NoOpenMotion => self.no_open_motion = false,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_preserves_order() {
        let checklist = ReadinessChecklist::complete()
            .without(ChecklistItem::PresidentDesignated)
            .without(ChecklistItem::MembersRegistered);
        let missing = checklist.missing(&[
            ChecklistItem::MembersRegistered,
            ChecklistItem::PoliciesAssigned,
            ChecklistItem::PresidentDesignated,
        ]);
        assert_eq!(
            missing,
            vec![
                ChecklistItem::MembersRegistered,
                ChecklistItem::PresidentDesignated
            ]
        );
    }

    #[test]
    fn test_default_is_empty() {
        let checklist = ReadinessChecklist::default();
        assert_eq!(
            checklist.missing(&[ChecklistItem::NoOpenMotion]),
            vec![ChecklistItem::NoOpenMotion]
        );
    }
}
