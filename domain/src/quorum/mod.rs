//! Quorum evaluation
//!
//! Decides whether enough of the assembly takes part for a vote to count.
//!
//! ```text
//! attendance roster ──aggregate_for(policy)──▶ AttendanceAggregate
//!                                                   │
//! QuorumPolicy + convocation_no ─────────────────▶ QuorumEvaluator ──▶ QuorumResult
//! ```

pub mod evaluator;

pub use evaluator::{QuorumEvaluator, QuorumResult};
