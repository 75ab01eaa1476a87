//! Quorum and vote policies
//!
//! Policies are plain records supplied by the caller. [`PolicyResolver`] picks
//! the effective pair for a motion (override over meeting default) and
//! [`PolicyCatalog`] turns the resolved ids into validated records.

pub mod catalog;
pub mod quorum_policy;
pub mod resolver;
pub mod vote_policy;

pub use catalog::PolicyCatalog;
pub use quorum_policy::{QuorumBasis, QuorumMode, QuorumPolicy};
pub use resolver::{PolicyResolution, PolicyResolver, ResolvedPolicy};
pub use vote_policy::{MajorityBase, VotePolicy};
