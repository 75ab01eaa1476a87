//! Domain error types
//!
//! Every failure the engine reports falls into one of three categories:
//!
//! - [`ConfigurationError`]: no usable policy could be resolved
//! - [`ValidationError`]: figures or edits that break arithmetic rules
//! - [`StateGuardError`]: lifecycle transitions or edits that the current state forbids
//!
//! All of them are local and recoverable. Each variant exposes a stable
//! machine-readable [`code`](DomainError::code) for callers that gate API responses on it.

use crate::core::ids::{MeetingId, MemberId, MotionId, PolicyId};
use crate::meeting::entities::MeetingStatus;
use crate::meeting::lifecycle::TransitionBlocker;
use crate::motion::entities::MotionStatus;
use crate::vote::tally::TallyField;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    StateGuard(#[from] StateGuardError),
}

impl DomainError {
    /// Machine-readable reason code of the underlying error
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Configuration(e) => e.code(),
            DomainError::Validation(e) => e.code(),
            DomainError::StateGuard(e) => e.code(),
        }
    }

    /// Error category name: `configuration`, `validation` or `state_guard`
    pub fn category(&self) -> &'static str {
        match self {
            DomainError::Configuration(_) => "configuration",
            DomainError::Validation(_) => "validation",
            DomainError::StateGuard(_) => "state_guard",
        }
    }
}

/// No usable policy for a motion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("No quorum policy configured for motion {motion} (no override, no meeting default)")]
    NoQuorumPolicy { motion: MotionId },

    #[error("No vote policy configured for motion {motion} (no override, no meeting default)")]
    NoVotePolicy { motion: MotionId },

    #[error("Policy {policy} is referenced but not defined")]
    UnknownPolicy { policy: PolicyId },

    #[error("Policy {policy} is invalid: {detail}")]
    InvalidPolicy { policy: PolicyId, detail: String },
}

impl ConfigurationError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigurationError::NoQuorumPolicy { .. } => "no_quorum_policy",
            ConfigurationError::NoVotePolicy { .. } => "no_vote_policy",
            ConfigurationError::UnknownPolicy { .. } => "unknown_policy",
            ConfigurationError::InvalidPolicy { .. } => "invalid_policy",
        }
    }
}

/// Figures or edits rejected by the tally and attendance rules
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Total must be greater than zero")]
    NonPositiveTotal,

    #[error("for + against + abstain = {sum} does not match total {total}")]
    SumMismatch { total: u64, sum: u64 },

    #[error("for + against + abstain is too large to count")]
    TallyOverflow,

    #[error("Field '{field}' must not be negative (got {value})")]
    NegativeValue { field: TallyField, value: f64 },

    #[error("Field '{field}' must be a whole number (got {value})")]
    NotAnInteger { field: TallyField, value: f64 },

    #[error("Field '{field}' is derived in manual-total mode and cannot be edited directly")]
    DerivedField { field: TallyField },

    #[error("Invalid proxy {giver} -> {receiver}: {detail}")]
    InvalidProxy {
        giver: MemberId,
        receiver: MemberId,
        detail: String,
    },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::NonPositiveTotal => "non_positive_total",
            ValidationError::SumMismatch { .. } => "sum_mismatch",
            ValidationError::TallyOverflow => "tally_overflow",
            ValidationError::NegativeValue { .. } => "negative_value",
            ValidationError::NotAnInteger { .. } => "not_an_integer",
            ValidationError::DerivedField { .. } => "derived_field",
            ValidationError::InvalidProxy { .. } => "invalid_proxy",
        }
    }
}

/// Transitions or edits forbidden by the current lifecycle state
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateGuardError {
    #[error("Motion {motion} is {state}; it can only be changed while pending")]
    MotionNotPending { motion: MotionId, state: MotionStatus },

    #[error("Cannot move motion {motion} from {from} to {to}")]
    InvalidMotionTransition {
        motion: MotionId,
        from: MotionStatus,
        to: MotionStatus,
    },

    #[error("Cannot open motion {motion}: motion {open_motion} is already open")]
    OpenMotionConflict {
        motion: MotionId,
        open_motion: MotionId,
    },

    #[error("Motion {motion} has not been opened yet")]
    MotionNotStarted { motion: MotionId },

    #[error("Meeting {meeting} is {status}; motions can only be opened while live")]
    MeetingNotLive {
        meeting: MeetingId,
        status: MeetingStatus,
    },

    #[error("Cannot move meeting from {from} to {to}: {}", describe_blockers(.reasons))]
    MeetingTransitionBlocked {
        from: MeetingStatus,
        to: MeetingStatus,
        reasons: Vec<TransitionBlocker>,
    },
}

impl StateGuardError {
    pub fn code(&self) -> &'static str {
        match self {
            StateGuardError::MotionNotPending { .. } => "motion_not_pending",
            StateGuardError::InvalidMotionTransition { .. } => "invalid_motion_transition",
            StateGuardError::OpenMotionConflict { .. } => "open_motion_conflict",
            StateGuardError::MotionNotStarted { .. } => "motion_not_started",
            StateGuardError::MeetingNotLive { .. } => "meeting_not_live",
            StateGuardError::MeetingTransitionBlocked { .. } => "meeting_transition_blocked",
        }
    }
}

fn describe_blockers(reasons: &[TransitionBlocker]) -> String {
    reasons
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
