//! Decision journal adapters

mod jsonl_journal;

pub use jsonl_journal::JsonlDecisionJournal;
