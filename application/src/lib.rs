//! Application layer for assembly-quorum
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DecisionConfig;
pub use ports::{
    assembly_store::{AssemblyStore, StoreError},
    decision_journal::{DecisionJournal, JournalEvent, NoDecisionJournal},
};
pub use use_cases::decide_motion::{DecideMotionError, DecideMotionOutput, DecideMotionUseCase};
pub use use_cases::manual_tally::{ManualTallyError, ManualTallyUseCase};
pub use use_cases::meeting_lifecycle::{MeetingLifecycleError, MeetingLifecycleUseCase};
pub use use_cases::motion_lifecycle::{MotionLifecycleError, MotionLifecycleUseCase};
