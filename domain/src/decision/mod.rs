//! Final decisions on motions

pub mod consolidator;

pub use consolidator::{Decision, DecisionConsolidator, DecisionStatus, ReasonCode, TallySource};
