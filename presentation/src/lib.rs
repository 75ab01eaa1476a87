//! Presentation layer for assembly-quorum
//!
//! This crate contains CLI definitions and output formatters.

pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{
    Cli, Command, MeetingAction, MotionAction, MotionEditArgs, TallyArgs, Toggle,
};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
