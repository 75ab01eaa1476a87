//! CLI command definitions

use assembly_domain::{MeetingStatus, MotionPatch, OutputFormat, PolicyId, TallyEdit, TallyField};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for assembly-quorum
#[derive(Parser, Debug)]
#[command(name = "assembly-quorum")]
#[command(author, version, about = "Governance decision engine - quorum, majority and motion lifecycle")]
#[command(long_about = r#"
Assembly Quorum decides motions of a general assembly from its attendance,
ballots and policies.

For each motion the engine:
1. Resolves the effective quorum and vote policies (motion override or meeting default)
2. Checks the quorum against the attendance roster
3. Checks the majority against the ballots or the saved manual tally
4. Records the decision: adopted, rejected or undecided

Configuration files are loaded from (in priority order):
1. ASSEMBLY_* environment variables
2. --config <path>      Explicit config file
3. ./assembly.toml      Project-level config
4. ~/.config/assembly-quorum/config.toml   Global config

Example:
  assembly-quorum --data agm.json decide m-1
  assembly-quorum --data agm.json tally m-1 --set for=42 --set against=7 --save
  assembly-quorum --data agm.json meeting check agm-2026 live
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Snapshot file (falls back to `[store] path`)
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Output format: full, summary or json
    #[arg(short, long, global = true, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute and record the decision on one motion
    Decide {
        /// Motion id
        motion: String,
    },

    /// Decide every opened motion of a meeting
    DecideAll {
        /// Meeting id
        meeting: String,
    },

    /// Edit, show or save the manual tally of a motion
    Tally(TallyArgs),

    /// Open, close, edit or delete a motion
    Motion {
        #[command(subcommand)]
        action: MotionAction,
    },

    /// Check or apply a meeting status transition
    Meeting {
        #[command(subcommand)]
        action: MeetingAction,
    },

    /// Show the effective policies of a motion
    Resolve {
        /// Motion id
        motion: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct TallyArgs {
    /// Motion id
    pub motion: String,

    /// Set a field (total, for, against, abstain), e.g. `--set for=12`
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_tally_edit)]
    pub edits: Vec<TallyEdit>,

    /// Record every present vote as "for"
    #[arg(long)]
    pub unanimous: bool,

    /// Let the operator set the total instead of deriving it
    #[arg(long, value_name = "on|off")]
    pub manual_total: Option<Toggle>,

    /// Replace the whole tally and save it: TOTAL FOR AGAINST ABSTAIN
    #[arg(
        long,
        num_args = 4,
        value_names = ["TOTAL", "FOR", "AGAINST", "ABSTAIN"],
        allow_negative_numbers = true,
        conflicts_with_all = ["edits", "unanimous", "manual_total"]
    )]
    pub submit: Option<Vec<f64>>,

    /// Validate and save the tally after applying the edits
    #[arg(long)]
    pub save: bool,
}

#[derive(Subcommand, Debug)]
pub enum MotionAction {
    /// Open a motion for voting
    Open { motion: String },
    /// Close an open motion
    Close { motion: String },
    /// Change a motion that was never opened
    Edit(MotionEditArgs),
    /// Delete a motion that was never opened
    Delete { motion: String },
}

#[derive(clap::Args, Debug)]
pub struct MotionEditArgs {
    pub motion: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Quorum policy override
    #[arg(long, value_name = "POLICY", conflicts_with = "clear_quorum_policy")]
    pub quorum_policy: Option<String>,

    /// Vote policy override
    #[arg(long, value_name = "POLICY", conflicts_with = "clear_vote_policy")]
    pub vote_policy: Option<String>,

    /// Fall back to the meeting's default quorum policy
    #[arg(long)]
    pub clear_quorum_policy: bool,

    /// Fall back to the meeting's default vote policy
    #[arg(long)]
    pub clear_vote_policy: bool,
}

impl MotionEditArgs {
    pub fn to_patch(&self) -> MotionPatch {
        let slot = |id: &Option<String>, clear: bool| match (id, clear) {
            (Some(id), _) => Some(Some(PolicyId::new(id.as_str()))),
            (None, true) => Some(None),
            (None, false) => None,
        };
        MotionPatch {
            title: self.title.clone(),
            description: self.description.clone(),
            quorum_policy_id: slot(&self.quorum_policy, self.clear_quorum_policy),
            vote_policy_id: slot(&self.vote_policy, self.clear_vote_policy),
            secret: None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum MeetingAction {
    /// Report whether the meeting may move to a status
    Check {
        meeting: String,
        /// Target status (draft, scheduled, frozen, live, closed, validated, archived)
        target: MeetingStatus,
    },
    /// Move the meeting to a status
    Transition {
        meeting: String,
        /// Target status (draft, scheduled, frozen, live, closed, validated, archived)
        target: MeetingStatus,
    },
}

/// on/off switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}

/// Parse `field=value`; the value is normalized like operator input
fn parse_tally_edit(raw: &str) -> Result<TallyEdit, String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Expected FIELD=VALUE, got: {}", raw))?;
    let field: TallyField = field.parse()?;
    Ok(TallyEdit::parse(field, value))
}
