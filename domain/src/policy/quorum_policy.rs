//! Quorum policy definitions
//!
//! A quorum policy states how much of the assembly must take part for a vote
//! to be valid. Three shapes are supported:
//!
//! - `single`: one ratio against one threshold
//! - `evolving`: one ratio, with a relaxed threshold on the second convocation
//! - `double`: two independent ratios (e.g. head count AND voting weight), both must hold

use crate::core::error::ConfigurationError;
use crate::core::ids::PolicyId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a quorum rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuorumMode {
    #[default]
    Single,
    Evolving,
    Double,
}

impl fmt::Display for QuorumMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuorumMode::Single => write!(f, "single"),
            QuorumMode::Evolving => write!(f, "evolving"),
            QuorumMode::Double => write!(f, "double"),
        }
    }
}

impl std::str::FromStr for QuorumMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(QuorumMode::Single),
            "evolving" => Ok(QuorumMode::Evolving),
            "double" => Ok(QuorumMode::Double),
            _ => Err(format!(
                "Unknown quorum mode: {}. Valid: single, evolving, double",
                s
            )),
        }
    }
}

/// What a participation ratio is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuorumBasis {
    /// Head count of eligible members
    #[default]
    EligibleMembers,
    /// Sum of eligible voting weight
    EligibleWeight,
}

impl fmt::Display for QuorumBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuorumBasis::EligibleMembers => write!(f, "eligible_members"),
            QuorumBasis::EligibleWeight => write!(f, "eligible_weight"),
        }
    }
}

/// Quorum policy record
///
/// # Example
///
/// ```
/// use assembly_domain::policy::{QuorumBasis, QuorumPolicy};
///
/// let policy = QuorumPolicy::evolving("qp-ordinary", "Ordinary", QuorumBasis::EligibleWeight, 0.5, 0.25);
/// assert!(policy.validate().is_ok());
/// assert_eq!(policy.threshold_for_convocation(2), 0.25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuorumPolicy {
    pub id: PolicyId,
    pub name: String,
    #[serde(default)]
    pub mode: QuorumMode,
    #[serde(default)]
    pub denominator: QuorumBasis,
    pub threshold: f64,
    /// Second-convocation threshold (evolving mode only)
    #[serde(default)]
    pub threshold_call2: Option<f64>,
    /// Second, independent basis (double mode only)
    #[serde(default)]
    pub denominator2: Option<QuorumBasis>,
    /// Threshold for the second basis (double mode only)
    #[serde(default)]
    pub threshold2: Option<f64>,
    /// Whether members represented by proxy count as present
    #[serde(default)]
    pub include_proxies: bool,
    /// Whether remote attendance counts as present
    #[serde(default)]
    pub count_remote: bool,
}

impl QuorumPolicy {
    pub fn single(
        id: impl Into<PolicyId>,
        name: impl Into<String>,
        denominator: QuorumBasis,
        threshold: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mode: QuorumMode::Single,
            denominator,
            threshold,
            threshold_call2: None,
            denominator2: None,
            threshold2: None,
            include_proxies: false,
            count_remote: false,
        }
    }

    pub fn evolving(
        id: impl Into<PolicyId>,
        name: impl Into<String>,
        denominator: QuorumBasis,
        threshold: f64,
        threshold_call2: f64,
    ) -> Self {
        Self {
            mode: QuorumMode::Evolving,
            threshold_call2: Some(threshold_call2),
            ..Self::single(id, name, denominator, threshold)
        }
    }

    pub fn double(
        id: impl Into<PolicyId>,
        name: impl Into<String>,
        (denominator, threshold): (QuorumBasis, f64),
        (denominator2, threshold2): (QuorumBasis, f64),
    ) -> Self {
        Self {
            mode: QuorumMode::Double,
            denominator2: Some(denominator2),
            threshold2: Some(threshold2),
            ..Self::single(id, name, denominator, threshold)
        }
    }

    pub fn with_proxies(mut self) -> Self {
        self.include_proxies = true;
        self
    }

    pub fn with_remote(mut self) -> Self {
        self.count_remote = true;
        self
    }

    /// Threshold that applies on the given convocation.
    ///
    /// Only evolving policies relax on the second convocation; a missing
    /// `threshold_call2` falls back to the first-call threshold.
    pub fn threshold_for_convocation(&self, convocation_no: u8) -> f64 {
        match self.mode {
            QuorumMode::Evolving if convocation_no >= 2 => {
                self.threshold_call2.unwrap_or(self.threshold)
            }
            _ => self.threshold,
        }
    }

    /// Check the policy invariants
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_threshold(&self.id, "threshold", self.threshold)?;

        if let Some(t2) = self.threshold_call2 {
            check_threshold(&self.id, "threshold_call2", t2)?;
        }

        if self.mode == QuorumMode::Double {
            let (Some(denominator2), Some(threshold2)) = (self.denominator2, self.threshold2) else {
                return Err(ConfigurationError::InvalidPolicy {
                    policy: self.id.clone(),
                    detail: "double mode requires denominator2 and threshold2".to_string(),
                });
            };
            if denominator2 == self.denominator {
                return Err(ConfigurationError::InvalidPolicy {
                    policy: self.id.clone(),
                    detail: format!("denominator2 must differ from denominator ({})", denominator2),
                });
            }
            check_threshold(&self.id, "threshold2", threshold2)?;
        }

        Ok(())
    }
}

/// A threshold must lie in (0, 1]
pub(crate) fn check_threshold(
    policy: &PolicyId,
    field: &str,
    value: f64,
) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidPolicy {
            policy: policy.clone(),
            detail: format!("{} must be in (0, 1], got {}", field, value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_for_convocation() {
        let single = QuorumPolicy::single("q", "q", QuorumBasis::EligibleWeight, 0.5);
        assert_eq!(single.threshold_for_convocation(1), 0.5);
        assert_eq!(single.threshold_for_convocation(2), 0.5);

        let evolving = QuorumPolicy::evolving("q", "q", QuorumBasis::EligibleWeight, 0.5, 0.25);
        assert_eq!(evolving.threshold_for_convocation(1), 0.5);
        assert_eq!(evolving.threshold_for_convocation(2), 0.25);
    }

    #[test]
    fn test_evolving_without_call2_falls_back() {
        let mut policy = QuorumPolicy::evolving("q", "q", QuorumBasis::EligibleMembers, 0.5, 0.2);
        policy.threshold_call2 = None;
        assert_eq!(policy.threshold_for_convocation(2), 0.5);
    }

    #[test]
    fn test_validate_threshold_range() {
        assert!(QuorumPolicy::single("q", "q", QuorumBasis::EligibleMembers, 1.0)
            .validate()
            .is_ok());
        assert!(QuorumPolicy::single("q", "q", QuorumBasis::EligibleMembers, 0.0)
            .validate()
            .is_err());
        assert!(QuorumPolicy::single("q", "q", QuorumBasis::EligibleMembers, 1.2)
            .validate()
            .is_err());
        assert!(QuorumPolicy::single("q", "q", QuorumBasis::EligibleMembers, f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_double_requires_independent_basis() {
        let ok = QuorumPolicy::double(
            "q",
            "q",
            (QuorumBasis::EligibleMembers, 0.5),
            (QuorumBasis::EligibleWeight, 0.5),
        );
        assert!(ok.validate().is_ok());

        let same = QuorumPolicy::double(
            "q",
            "q",
            (QuorumBasis::EligibleWeight, 0.5),
            (QuorumBasis::EligibleWeight, 0.3),
        );
        assert!(matches!(
            same.validate(),
            Err(ConfigurationError::InvalidPolicy { .. })
        ));

        let mut missing = ok.clone();
        missing.threshold2 = None;
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"id":"qp","name":"Ordinary","threshold":0.5}"#;
        let policy: QuorumPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.mode, QuorumMode::Single);
        assert_eq!(policy.denominator, QuorumBasis::EligibleMembers);
        assert!(!policy.include_proxies);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Double".parse::<QuorumMode>().ok(), Some(QuorumMode::Double));
        assert!("triple".parse::<QuorumMode>().is_err());
    }
}
