//! File locations from TOML (`[store]`, `[journal]` and `[logging]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[store]`: default snapshot file when `--data` is not given
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    pub path: Option<PathBuf>,
}

/// `[journal]`: JSONL decision journal, disabled when unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJournalConfig {
    pub path: Option<PathBuf>,
}

/// `[logging]`: directory for rolling log files, stderr only when unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub directory: Option<PathBuf>,
}

/// A path that was set to an empty string
pub(super) fn is_empty_path(path: &Option<PathBuf>) -> bool {
    path.as_ref()
        .is_some_and(|p| p.as_os_str().to_string_lossy().trim().is_empty())
}
