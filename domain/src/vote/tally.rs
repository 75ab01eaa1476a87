//! Manual tally reconciliation
//!
//! When electronic ballots are unavailable the operator types the figures in.
//! The reconciler keeps `total`, `for`, `against` and `abstain` consistent
//! under two editing modes:
//!
//! ```text
//! auto-sum (manual_total_mode = false)
//!   edit for/against/abstain -> total = for + against + abstain
//!   edit total               -> switch to manual-total, then as below
//!
//! manual-total (manual_total_mode = true)
//!   total is fixed by the operator
//!   edit against/abstain     -> for = total - (against + abstain)
//!                               (the most recently edited of the two is clamped
//!                                if against + abstain would exceed total)
//!   edit for                 -> rejected, for is derived
//! ```
//!
//! Every figure is clamped to >= 0 and unparseable input reads as 0.
//! [`TallyReconciler::validate`] is re-run before anything is persisted.

use super::ballot::VoteCounts;
use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four tally figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TallyField {
    Total,
    For,
    Against,
    Abstain,
}

impl TallyField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TallyField::Total => "total",
            TallyField::For => "for",
            TallyField::Against => "against",
            TallyField::Abstain => "abstain",
        }
    }
}

impl fmt::Display for TallyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TallyField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "total" => Ok(TallyField::Total),
            "for" | "yes" => Ok(TallyField::For),
            "against" | "no" => Ok(TallyField::Against),
            "abstain" | "abstention" => Ok(TallyField::Abstain),
            _ => Err(format!(
                "Unknown tally field: {}. Valid: total, for, against, abstain",
                s
            )),
        }
    }
}

/// Operator-entered figures for one motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManualTally {
    pub total: u64,
    #[serde(rename = "for")]
    pub for_votes: u64,
    pub against: u64,
    pub abstain: u64,
}

impl ManualTally {
    pub fn new(total: u64, for_votes: u64, against: u64, abstain: u64) -> Self {
        Self {
            total,
            for_votes,
            against,
            abstain,
        }
    }

    /// Build from figures submitted as numbers (e.g. a form or JSON body).
    ///
    /// Unlike interactive edits, a complete submission is not clamped: negative
    /// or fractional figures are rejected.
    pub fn from_submitted(
        total: f64,
        for_votes: f64,
        against: f64,
        abstain: f64,
    ) -> Result<Self, ValidationError> {
        let check = |field: TallyField, value: f64| -> Result<u64, ValidationError> {
            if !value.is_finite() || value.fract() != 0.0 {
                return Err(ValidationError::NotAnInteger { field, value });
            }
            if value < 0.0 {
                return Err(ValidationError::NegativeValue { field, value });
            }
            Ok(value as u64)
        };

        Ok(Self {
            total: check(TallyField::Total, total)?,
            for_votes: check(TallyField::For, for_votes)?,
            against: check(TallyField::Against, against)?,
            abstain: check(TallyField::Abstain, abstain)?,
        })
    }

    pub fn get(&self, field: TallyField) -> u64 {
        match field {
            TallyField::Total => self.total,
            TallyField::For => self.for_votes,
            TallyField::Against => self.against,
            TallyField::Abstain => self.abstain,
        }
    }

    fn set(&mut self, field: TallyField, value: u64) {
        match field {
            TallyField::Total => self.total = value,
            TallyField::For => self.for_votes = value,
            TallyField::Against => self.against = value,
            TallyField::Abstain => self.abstain = value,
        }
    }

    /// for + against + abstain, or `None` when it does not fit in a u64
    pub fn sum(&self) -> Option<u64> {
        self.for_votes
            .checked_add(self.against)?
            .checked_add(self.abstain)
    }

    pub fn to_counts(&self) -> VoteCounts {
        VoteCounts::new(
            self.for_votes as f64,
            self.against as f64,
            self.abstain as f64,
        )
    }
}

impl fmt::Display for ManualTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={} for={} against={} abstain={}",
            self.total, self.for_votes, self.against, self.abstain
        )
    }
}

/// Normalize raw operator input: negatives clamp to 0, fractions truncate,
/// anything unparseable reads as 0.
pub fn normalize_input(raw: &str) -> u64 {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i128>() {
        return n.clamp(0, u64::MAX as i128) as u64;
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n.trunc().min(u64::MAX as f64) as u64,
        _ => 0,
    }
}

/// A single field edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEdit {
    pub field: TallyField,
    pub value: u64,
}

impl TallyEdit {
    /// Negative values clamp to 0
    pub fn new(field: TallyField, value: i64) -> Self {
        Self {
            field,
            value: value.max(0) as u64,
        }
    }

    pub fn parse(field: TallyField, raw: &str) -> Self {
        Self {
            field,
            value: normalize_input(raw),
        }
    }
}

/// Tally plus the editing mode it is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TallyState {
    pub tally: ManualTally,
    #[serde(default)]
    pub manual_total_mode: bool,
    /// Most recently edited of against/abstain, used to pick what to clamp
    #[serde(default)]
    pub last_edited: Option<TallyField>,
}

impl TallyState {
    pub fn new(tally: ManualTally, manual_total_mode: bool) -> Self {
        Self {
            tally,
            manual_total_mode,
            last_edited: None,
        }
    }
}

pub struct TallyReconciler;

impl TallyReconciler {
    /// Apply one edit and return the normalized state.
    ///
    /// The input state is never modified; on error the caller keeps it.
    ///
    /// # Example
    ///
    /// ```
    /// use assembly_domain::vote::{TallyEdit, TallyField, TallyReconciler, TallyState};
    ///
    /// let state = TallyState::default();
    /// let state = TallyReconciler::reconcile(&state, TallyEdit::new(TallyField::Total, 50)).unwrap();
    /// let state = TallyReconciler::reconcile(&state, TallyEdit::new(TallyField::Against, 10)).unwrap();
    /// let state = TallyReconciler::reconcile(&state, TallyEdit::new(TallyField::Abstain, 5)).unwrap();
    /// assert!(state.manual_total_mode);
    /// assert_eq!(state.tally.for_votes, 35);
    /// ```
    pub fn reconcile(current: &TallyState, edit: TallyEdit) -> Result<TallyState, ValidationError> {
        let mut next = *current;

        match (next.manual_total_mode, edit.field) {
            (true, TallyField::For) => {
                return Err(ValidationError::DerivedField {
                    field: TallyField::For,
                });
            }
            (false, TallyField::Total) => {
                next.manual_total_mode = true;
                next.tally.total = edit.value;
                Self::fit_to_total(&mut next);
            }
            (false, field) => {
                next.tally.set(field, edit.value);
                if matches!(field, TallyField::Against | TallyField::Abstain) {
                    next.last_edited = Some(field);
                }
                next.tally.total = next.tally.sum().ok_or(ValidationError::TallyOverflow)?;
            }
            (true, TallyField::Total) => {
                next.tally.total = edit.value;
                Self::fit_to_total(&mut next);
            }
            (true, field) => {
                next.tally.set(field, edit.value);
                next.last_edited = Some(field);
                Self::fit_to_total(&mut next);
            }
        }

        Ok(next)
    }

    /// Apply several edits in order, stopping at the first rejected one
    pub fn reconcile_all(
        current: &TallyState,
        edits: impl IntoIterator<Item = TallyEdit>,
    ) -> Result<TallyState, ValidationError> {
        edits
            .into_iter()
            .try_fold(*current, |state, edit| Self::reconcile(&state, edit))
    }

    /// Switch editing mode explicitly.
    ///
    /// Leaving manual-total mode recomputes the total from the three figures.
    pub fn set_manual_total_mode(
        current: &TallyState,
        enabled: bool,
    ) -> Result<TallyState, ValidationError> {
        let mut next = *current;
        next.manual_total_mode = enabled;
        if enabled {
            Self::fit_to_total(&mut next);
        } else {
            next.tally.total = next.tally.sum().ok_or(ValidationError::TallyOverflow)?;
        }
        Ok(next)
    }

    /// Everyone voted for: `for = total`, `against = abstain = 0`.
    ///
    /// Uses the current total, or the current sum when the total is zero.
    /// The editing mode is left as is.
    pub fn unanimous(current: &TallyState) -> Result<TallyState, ValidationError> {
        let mut next = *current;
        let basis = if next.tally.total > 0 {
            next.tally.total
        } else {
            next.tally.sum().ok_or(ValidationError::TallyOverflow)?
        };
        next.tally = ManualTally::new(basis, basis, 0, 0);
        next.last_edited = None;
        Ok(next)
    }

    /// Save-time check: positive total and an exact sum
    pub fn validate(tally: &ManualTally) -> Result<(), ValidationError> {
        if tally.total == 0 {
            return Err(ValidationError::NonPositiveTotal);
        }
        let sum = tally.sum().ok_or(ValidationError::TallyOverflow)?;
        if sum != tally.total {
            return Err(ValidationError::SumMismatch {
                total: tally.total,
                sum,
            });
        }
        Ok(())
    }

    /// Clamp against/abstain under the fixed total, then derive `for`
    fn fit_to_total(state: &mut TallyState) {
        let total = state.tally.total;
        let exceeds = match state.tally.against.checked_add(state.tally.abstain) {
            Some(sum) => sum > total,
            None => true,
        };
        if exceeds {
            let (clamped, other) = match state.last_edited {
                Some(TallyField::Against) => (TallyField::Against, TallyField::Abstain),
                _ => (TallyField::Abstain, TallyField::Against),
            };
            let other_value = state.tally.get(other).min(total);
            state.tally.set(other, other_value);
            state.tally.set(clamped, total - other_value);
        }
        // against + abstain <= total holds after the clamp above
        state.tally.for_votes = total - state.tally.against - state.tally.abstain;
    }
}
