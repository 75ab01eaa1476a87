//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod decision;
mod output;
mod paths;

pub use decision::FileDecisionConfig;
pub use output::{FileOutputConfig, FileOutputFormat, MAX_RATIO_PRECISION};
pub use paths::{FileJournalConfig, FileLoggingConfig, FileStoreConfig};

use assembly_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Tally source preference and lifecycle guards
    pub decision: FileDecisionConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Snapshot file
    pub store: FileStoreConfig,
    /// Decision journal
    pub journal: FileJournalConfig,
    /// Log files
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. `output.ratio_precision` within range
    /// 2. Path settings present but empty
    /// 3. Journal pointed at the snapshot file
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Output precision
        issues.extend(self.output.effective_precision().1);

        // 2. Empty paths
        for (field, empty) in [
            ("store.path", paths::is_empty_path(&self.store.path)),
            ("journal.path", paths::is_empty_path(&self.journal.path)),
            ("logging.directory", paths::is_empty_path(&self.logging.directory)),
        ] {
            if empty {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyPath,
                    format!("{}: path is empty", field),
                ));
            }
        }

        // 3. Journal would overwrite the snapshot
        if let (Some(store), Some(journal)) = (&self.store.path, &self.journal.path)
            && store == journal
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::JournalOverlapsStore,
                format!(
                    "journal.path and store.path are both {}",
                    journal.display()
                ),
            ));
        }

        issues
    }
}
