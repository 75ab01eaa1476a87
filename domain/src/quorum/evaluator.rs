//! Quorum evaluation
//!
//! Consumes final attendance figures (inclusion flags already applied) and
//! the convocation number. Never divides by zero: an empty eligible basis
//! yields `ratio = 0` and `met = false`.

use crate::core::error::ConfigurationError;
use crate::core::ids::PolicyId;
use crate::meeting::attendance::AttendanceAggregate;
use crate::policy::quorum_policy::{QuorumBasis, QuorumMode, QuorumPolicy};
use serde::{Deserialize, Serialize};

/// Outcome of a quorum evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuorumResult {
    pub policy_id: PolicyId,
    pub mode: QuorumMode,
    pub met: bool,
    pub ratio: f64,
    /// Second ratio, double mode only
    pub ratio2: Option<f64>,
    /// Threshold applied to `ratio` (depends on convocation in evolving mode)
    pub threshold: f64,
    pub threshold2: Option<f64>,
    pub convocation_no: u8,
}

/// Participation ratio and whether it reaches the threshold
#[derive(Debug, Clone, Copy, PartialEq)]
struct Participation {
    ratio: f64,
    met: bool,
}

impl Participation {
    fn measure(attendance: &AttendanceAggregate, basis: QuorumBasis, threshold: f64) -> Self {
        let (present, eligible) = attendance.figures(basis);
        if !(eligible.is_finite() && eligible > 0.0) {
            return Self {
                ratio: 0.0,
                met: false,
            };
        }
        let ratio = present.max(0.0) / eligible;
        Self {
            ratio,
            met: ratio >= threshold,
        }
    }
}

pub struct QuorumEvaluator;

impl QuorumEvaluator {
    /// Evaluate attendance against a quorum policy.
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_domain::meeting::AttendanceAggregate;
    /// use assembly_domain::policy::{QuorumBasis, QuorumPolicy};
    /// use assembly_domain::quorum::QuorumEvaluator;
    ///
    /// let policy = QuorumPolicy::evolving("qp", "Ordinary", QuorumBasis::EligibleWeight, 0.5, 0.25);
    /// let attendance = AttendanceAggregate::new(12, 40.0, 30, 100.0);
    ///
    /// assert!(!QuorumEvaluator::evaluate(&policy, &attendance, 1).unwrap().met);
    /// assert!(QuorumEvaluator::evaluate(&policy, &attendance, 2).unwrap().met);
    /// ```
    pub fn evaluate(
        policy: &QuorumPolicy,
        attendance: &AttendanceAggregate,
        convocation_no: u8,
    ) -> Result<QuorumResult, ConfigurationError> {
        policy.validate()?;

        let threshold = policy.threshold_for_convocation(convocation_no);
        let primary = Participation::measure(attendance, policy.denominator, threshold);

        let (met, ratio2, threshold2) = match (policy.mode, policy.denominator2, policy.threshold2) {
            (QuorumMode::Double, Some(basis2), Some(threshold2)) => {
                let secondary = Participation::measure(attendance, basis2, threshold2);
                (
                    primary.met && secondary.met,
                    Some(secondary.ratio),
                    Some(threshold2),
                )
            }
            _ => (primary.met, None, None),
        };

        Ok(QuorumResult {
            policy_id: policy.id.clone(),
            mode: policy.mode,
            met,
            ratio: primary.ratio,
            ratio2,
            threshold,
            threshold2,
            convocation_no,
        })
    }
}
