//! Application-level configuration.
//!
//! - [`DecisionConfig`]: tally source preference and lifecycle guards

pub mod decision_config;

pub use decision_config::DecisionConfig;
