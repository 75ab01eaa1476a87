//! Motions and their lifecycle

pub mod entities;
pub mod lifecycle;

pub use entities::{Motion, MotionPatch, MotionStatus};
pub use lifecycle::MotionStateMachine;
