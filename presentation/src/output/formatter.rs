//! Output formatter trait

use assembly_application::DecideMotionOutput;
use assembly_domain::{Meeting, Motion, MotionId, PolicyResolution, TallyState, TransitionCheck};

/// Trait for rendering use case results
pub trait OutputFormatter {
    /// One decision
    fn decision(&self, output: &DecideMotionOutput) -> String;

    /// Decisions of a whole meeting
    fn decisions(&self, outputs: &[DecideMotionOutput]) -> String;

    /// Effective policies and where they come from
    fn resolution(&self, resolution: &PolicyResolution) -> String;

    /// Result of a meeting transition check
    fn transition_check(&self, check: &TransitionCheck) -> String;

    /// Manual tally working state
    fn tally(&self, motion: &MotionId, state: &TallyState, saved: bool) -> String;

    /// Motion after a lifecycle change
    fn motion(&self, motion: &Motion) -> String;

    /// Meeting after a transition
    fn meeting(&self, meeting: &Meeting) -> String;
}
