//! Helpers shared by the use cases.

use crate::ports::decision_journal::{DecisionJournal, JournalEvent};
use serde::Serialize;
use serde_json::{Value, json};

/// Lets `?` lift every domain error category into a use case error that has
/// a `Domain(DomainError)` variant.
macro_rules! domain_error_conversions {
    ($error:ty) => {
        impl From<assembly_domain::ConfigurationError> for $error {
            fn from(e: assembly_domain::ConfigurationError) -> Self {
                Self::Domain(e.into())
            }
        }

        impl From<assembly_domain::ValidationError> for $error {
            fn from(e: assembly_domain::ValidationError) -> Self {
                Self::Domain(e.into())
            }
        }

        impl From<assembly_domain::StateGuardError> for $error {
            fn from(e: assembly_domain::StateGuardError) -> Self {
                Self::Domain(e.into())
            }
        }
    };
}

pub(crate) use domain_error_conversions;

/// Machine-readable code for a store failure
pub(crate) fn store_error_code(e: &crate::ports::assembly_store::StoreError) -> &'static str {
    use crate::ports::assembly_store::StoreError;
    match e {
        StoreError::NotFound { .. } => "not_found",
        StoreError::Io(_) => "store_io",
        StoreError::Corrupt(_) => "store_corrupt",
    }
}

/// Record `value` under `key` in a journal event payload.
///
/// Serialization of domain records cannot fail in practice; if it ever does
/// the event is still written with a null body.
pub(crate) fn journal(
    journal: &dyn DecisionJournal,
    event_type: &'static str,
    key: &str,
    value: &impl Serialize,
) {
    let body = serde_json::to_value(value).unwrap_or(Value::Null);
    journal.record(JournalEvent::new(event_type, json!({ key: body })));
}
