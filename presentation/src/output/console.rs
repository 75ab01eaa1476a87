//! Console output formatter for decisions and lifecycle results

use crate::config::OutputConfig;
use crate::output::formatter::OutputFormatter;
use assembly_application::DecideMotionOutput;
use assembly_domain::{
    DecisionStatus, Meeting, Motion, MotionId, OutputFormat, PolicyResolution, ResolvedPolicy,
    TallyState, TransitionCheck,
};
use colored::Colorize;
use serde::Serialize;

/// Formats results for console display, or as JSON
pub struct ConsoleFormatter {
    config: OutputConfig,
}

impl ConsoleFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    fn is_json(&self) -> bool {
        self.config.format == OutputFormat::Json
    }

    /// Format as JSON
    pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Ratio with the configured number of digits
    fn ratio(&self, value: f64) -> String {
        format!("{:.*}", self.config.ratio_precision, value)
    }

    /// Vote figure: integral values without decimals
    fn figure(&self, value: f64) -> String {
        if value.fract() == 0.0 {
            format!("{}", value)
        } else {
            self.ratio(value)
        }
    }

    fn status_label(status: DecisionStatus) -> String {
        let label = status.to_string().to_uppercase();
        match status {
            DecisionStatus::Adopted => label.green().bold().to_string(),
            DecisionStatus::Rejected => label.red().bold().to_string(),
            DecisionStatus::Undecided => label.yellow().bold().to_string(),
        }
    }

    fn met_label(met: bool) -> String {
        if met {
            "met".green().to_string()
        } else {
            "not met".red().to_string()
        }
    }

    fn origin(slot: &ResolvedPolicy) -> &'static str {
        if slot.is_override {
            "override"
        } else {
            "meeting default"
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn summary_line(&self, output: &DecideMotionOutput) -> String {
        let d = &output.decision;
        format!(
            "{}  {}  quorum {}/{}  majority {}/{}  [{}]",
            d.motion_id.as_str().bold(),
            Self::status_label(d.status),
            self.ratio(d.quorum_ratio),
            self.ratio(d.quorum_threshold),
            self.ratio(d.majority_ratio),
            self.ratio(d.majority_threshold),
            d.reason
        )
    }

    fn full(&self, output: &DecideMotionOutput) -> String {
        let d = &output.decision;
        let mut out = String::new();

        out.push_str(&Self::header(&format!("Decision: {}", d.motion_id)));
        out.push('\n');
        out.push_str(&format!(
            "{} {} ({})\n",
            "Status:".cyan().bold(),
            Self::status_label(d.status),
            d.reason
        ));

        // Quorum
        let q = &output.quorum;
        out.push_str(&Self::section_header("Quorum"));
        out.push_str(&format!(
            "  policy     {} ({})\n  mode       {}, convocation {}\n  ratio      {} / threshold {}  {}\n",
            d.quorum_policy_id,
            Self::origin(&output.resolution.quorum),
            q.mode,
            q.convocation_no,
            self.ratio(q.ratio),
            self.ratio(q.threshold),
            Self::met_label(q.met)
        ));
        if let (Some(ratio2), Some(threshold2)) = (q.ratio2, q.threshold2) {
            out.push_str(&format!(
                "  ratio2     {} / threshold {}\n",
                self.ratio(ratio2),
                self.ratio(threshold2)
            ));
        }

        // Majority
        let m = &output.majority;
        out.push_str(&Self::section_header("Majority"));
        out.push_str(&format!(
            "  policy     {} ({})\n  base       {}\n  tally      for {} / against {} / abstain {} ({})\n  ratio      {} / threshold {}  {}\n",
            d.vote_policy_id,
            Self::origin(&output.resolution.vote),
            m.base,
            self.figure(d.tally.for_votes),
            self.figure(d.tally.against),
            self.figure(d.tally.abstain),
            d.tally_source,
            self.ratio(m.ratio),
            self.ratio(m.threshold),
            Self::met_label(m.met)
        ));

        out.push_str(&format!("\n{}\n", "=".repeat(60).cyan()));
        out
    }

    fn resolved(slot: &ResolvedPolicy) -> String {
        match &slot.id {
            Some(id) => format!("{} ({})", id, Self::origin(slot)),
            None => "none".red().to_string(),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn decision(&self, output: &DecideMotionOutput) -> String {
        match self.config.format {
            OutputFormat::Json => Self::format_json(&output.decision),
            OutputFormat::Full => self.full(output),
            OutputFormat::Summary => self.summary_line(output),
        }
    }

    fn decisions(&self, outputs: &[DecideMotionOutput]) -> String {
        if self.is_json() {
            let decisions: Vec<_> = outputs.iter().map(|o| &o.decision).collect();
            return Self::format_json(&decisions);
        }
        if outputs.is_empty() {
            return "No opened motion to decide".dimmed().to_string();
        }
        outputs
            .iter()
            .map(|output| self.decision(output))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn resolution(&self, resolution: &PolicyResolution) -> String {
        if self.is_json() {
            return Self::format_json(resolution);
        }
        format!(
            "{} {}\n  {} {}\n  {} {}",
            "Motion:".cyan().bold(),
            resolution.motion,
            "quorum policy:".bold(),
            Self::resolved(&resolution.quorum),
            "vote policy:  ".bold(),
            Self::resolved(&resolution.vote)
        )
    }

    fn transition_check(&self, check: &TransitionCheck) -> String {
        if self.is_json() {
            return Self::format_json(check);
        }
        let mut out = format!("{} -> {}: ", check.from, check.to);
        if check.ok {
            out.push_str(&"allowed".green().bold().to_string());
            return out;
        }
        out.push_str(&"blocked".red().bold().to_string());
        for reason in &check.reasons {
            out.push_str(&format!("\n  * {}", reason));
        }
        out
    }

    fn tally(&self, motion: &MotionId, state: &TallyState, saved: bool) -> String {
        if self.is_json() {
            return Self::format_json(&serde_json::json!({
                "motion_id": motion,
                "state": state,
                "saved": saved,
            }));
        }
        let mode = if state.manual_total_mode {
            "manual total"
        } else {
            "derived total"
        };
        let mut out = format!(
            "{} {}  {} ({})",
            "Tally".cyan().bold(),
            motion,
            state.tally,
            mode
        );
        if saved {
            out.push_str(&format!("  {}", "saved".green()));
        }
        out
    }

    fn motion(&self, motion: &Motion) -> String {
        if self.is_json() {
            return Self::format_json(motion);
        }
        format!(
            "{} {} \"{}\": {}",
            "Motion".cyan().bold(),
            motion.id,
            motion.title,
            motion.status()
        )
    }

    fn meeting(&self, meeting: &Meeting) -> String {
        if self.is_json() {
            return Self::format_json(meeting);
        }
        format!(
            "{} {}: {}",
            "Meeting".cyan().bold(),
            meeting.id,
            meeting.status.to_string().bold()
        )
    }
}
