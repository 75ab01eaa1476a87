//! Port for the decision journal.
//!
//! Defines the [`DecisionJournal`] trait for recording governance events
//! (decisions, saved tallies, motion and meeting transitions) to an
//! append-only, machine-readable log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while the journal is the audit trail.

use serde_json::Value;

/// A structured journal event.
///
/// Each event has a type string and a JSON payload; the adapter stamps it
/// with the time it was written.
pub struct JournalEvent {
    /// Event type identifier (e.g., "decision_recorded", "motion_opened").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl JournalEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for journaling governance events.
///
/// The `record` method is synchronous and non-fallible: a journal failure
/// must never undo or block a decision that has already been stored.
pub trait DecisionJournal: Send + Sync {
    /// Record a journal event.
    fn record(&self, event: JournalEvent);
}

/// No-op implementation for tests and when journaling is disabled.
pub struct NoDecisionJournal;

impl DecisionJournal for NoDecisionJournal {
    fn record(&self, _event: JournalEvent) {}
}
