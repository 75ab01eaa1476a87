//! Domain layer for assembly-quorum
//!
//! This crate contains the governance decision engine: policies, quorum and
//! majority evaluation, the manual tally reconciler, decision consolidation
//! and the motion/meeting lifecycles. It performs no I/O and holds no
//! state between calls; every operation is a pure function of its inputs.
//!
//! # Core Concepts
//!
//! ## Policies
//!
//! - **Quorum policy**: how much of the assembly must take part
//!   (`single`, `evolving` by convocation, or `double` on two bases)
//! - **Vote policy**: how the votes cast are weighed against a threshold
//!
//! A motion may override the meeting's default policies; [`PolicyResolver`]
//! picks the effective pair.
//!
//! ## Decision pipeline
//!
//! ```text
//! Motion + Meeting ──▶ PolicyResolver ──▶ PolicyCatalog
//!                                            │
//!   AttendanceRoster ──▶ QuorumEvaluator ◀───┤
//!   ballots / tally  ──▶ MajorityEvaluator ◀─┘
//!                              │
//!                      DecisionConsolidator ──▶ Decision
//! ```

pub mod config;
pub mod core;
pub mod decision;
pub mod meeting;
pub mod motion;
pub mod policy;
pub mod quorum;
pub mod vote;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::{ConfigurationError, DomainError, StateGuardError, ValidationError},
    ids::{MeetingId, MemberId, MotionId, PolicyId},
};
pub use decision::{Decision, DecisionConsolidator, DecisionStatus, ReasonCode, TallySource};
pub use meeting::{
    AttendanceAggregate, AttendanceMode, AttendanceRecord, AttendanceRoster, ChecklistItem,
    Meeting, MeetingStateMachine, MeetingStatus, Proxy, ReadinessChecklist, TransitionBlocker,
    TransitionCheck,
};
pub use motion::{Motion, MotionPatch, MotionStateMachine, MotionStatus};
pub use policy::{
    MajorityBase, PolicyCatalog, PolicyResolution, PolicyResolver, QuorumBasis, QuorumMode,
    QuorumPolicy, ResolvedPolicy, VotePolicy,
};
pub use quorum::{QuorumEvaluator, QuorumResult};
pub use vote::{
    Ballot, BallotBox, BallotSource, BallotValue, MajorityEvaluator, MajorityResult, ManualTally,
    TallyEdit, TallyField, TallyReconciler, TallyState, VoteCounts,
};
