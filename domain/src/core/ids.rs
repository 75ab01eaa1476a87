//! Identifier value objects
//!
//! All identifiers are opaque strings issued by the persistence collaborator.
//! The engine only compares them; it never generates them.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from an existing string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is blank (empty or whitespace only).
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&String> for $name {
            fn from(s: &String) -> Self {
                Self::new(s.as_str())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a general meeting.
    MeetingId
);

string_id!(
    /// Identifier of a motion put to the vote.
    MotionId
);

string_id!(
    /// Identifier of a member of the assembly.
    MemberId
);

string_id!(
    /// Identifier of a quorum or vote policy.
    PolicyId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(PolicyId::new("").is_blank());
        assert!(PolicyId::new("   ").is_blank());
        assert!(!PolicyId::new("qp-1").is_blank());
    }

    #[test]
    fn test_serde_transparent() {
        let id = MotionId::new("m-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"m-7\"");
        let back: MotionId = serde_json::from_str("\"m-7\"").unwrap();
        assert_eq!(back, id);
    }
}
