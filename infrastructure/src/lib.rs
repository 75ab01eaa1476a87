//! Infrastructure layer for assembly-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod journal;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileDecisionConfig, FileJournalConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileStoreConfig, MAX_RATIO_PRECISION,
};
pub use journal::JsonlDecisionJournal;
pub use store::{AssemblySnapshot, JsonSnapshotStore};
