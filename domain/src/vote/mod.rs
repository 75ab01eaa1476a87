//! Voting: ballots, the manual tally reconciler and majority evaluation

pub mod ballot;
pub mod majority;
pub mod tally;

pub use ballot::{Ballot, BallotBox, BallotSource, BallotValue, VoteCounts};
pub use majority::{MajorityEvaluator, MajorityResult};
pub use tally::{ManualTally, TallyEdit, TallyField, TallyReconciler, TallyState, normalize_input};
