//! General meetings
//!
//! The meeting entity, its attendance (with proxies), the readiness checklist
//! and the meeting lifecycle state machine.

pub mod attendance;
pub mod checklist;
pub mod entities;
pub mod lifecycle;

pub use attendance::{AttendanceAggregate, AttendanceMode, AttendanceRecord, AttendanceRoster, Proxy};
pub use checklist::{ChecklistItem, ReadinessChecklist};
pub use entities::{Meeting, MeetingStatus};
pub use lifecycle::{MeetingStateMachine, TransitionBlocker, TransitionCheck};
