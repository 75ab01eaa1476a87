//! Presentation-level configuration
//!
//! Configuration for output formatting.

use assembly_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "full", "summary", or "json"
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Fractional digits shown for ratios and thresholds
    pub ratio_precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            ratio_precision: 3,
        }
    }
}

impl OutputConfig {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_ratio_precision(mut self, precision: usize) -> Self {
        self.ratio_precision = precision;
        self
    }
}
