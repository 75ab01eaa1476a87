//! Configuration issues
//!
//! Loading never fails on a suspicious value; the loader reports what it
//! found as [`ConfigIssue`]s and the caller decides whether to stop.

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the value is used but probably not what was meant.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `ratio_precision` beyond what an f64 can meaningfully show.
    RatioPrecisionOutOfRange,
    /// A path setting is present but empty.
    EmptyPath,
    /// Journal and snapshot point at the same file.
    JournalOverlapsStore,
}

impl ConfigIssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigIssueCode::RatioPrecisionOutOfRange => "ratio_precision_out_of_range",
            ConfigIssueCode::EmptyPath => "empty_path",
            ConfigIssueCode::JournalOverlapsStore => "journal_overlaps_store",
        }
    }
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// True if any issue is fatal.
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{} [{}]: {}", level, self.code.as_str(), self.message)
    }
}
