//! Output configuration from TOML (`[output]` section)

use assembly_domain::{ConfigIssue, ConfigIssueCode, OutputFormat};
use serde::{Deserialize, Serialize};

// Re-export OutputFormat from domain for convenience
pub use assembly_domain::OutputFormat as FileOutputFormat;

/// Most fractional digits worth printing for an f64 ratio
pub const MAX_RATIO_PRECISION: usize = 12;

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Fractional digits shown for ratios and thresholds
    pub ratio_precision: usize,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            ratio_precision: 3,
        }
    }
}

impl FileOutputConfig {
    /// Precision to use, capped at [`MAX_RATIO_PRECISION`]
    pub fn effective_precision(&self) -> (usize, Option<ConfigIssue>) {
        if self.ratio_precision > MAX_RATIO_PRECISION {
            let issue = ConfigIssue::warning(
                ConfigIssueCode::RatioPrecisionOutOfRange,
                format!(
                    "output.ratio_precision: {} is more than {} digits, using {}",
                    self.ratio_precision, MAX_RATIO_PRECISION, MAX_RATIO_PRECISION
                ),
            );
            (MAX_RATIO_PRECISION, Some(issue))
        } else {
            (self.ratio_precision, None)
        }
    }
}
