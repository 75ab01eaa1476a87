//! CLI entrypoint for Assembly Quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use assembly_application::{
    DecideMotionUseCase, DecisionConfig, DecisionJournal, ManualTallyUseCase,
    MeetingLifecycleUseCase, MotionLifecycleUseCase, NoDecisionJournal,
};
use assembly_domain::{ConfigIssue, MeetingId, MotionId};
use assembly_infrastructure::{ConfigLoader, FileConfig, JsonSnapshotStore, JsonlDecisionJournal};
use assembly_presentation::{
    Cli, Command, ConsoleFormatter, MeetingAction, MotionAction, OutputConfig, OutputFormatter,
    TallyArgs,
};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log file name inside `[logging] directory`
const LOG_FILE_PREFIX: &str = "assembly-quorum.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = file_config.validate();
    for issue in &issues {
        eprintln!("{}", issue);
    }
    if ConfigIssue::has_errors(&issues) {
        bail!("Invalid configuration ({} issue(s))", issues.len());
    }

    // Keep the guard alive so buffered log lines reach the file
    let _log_guard = init_logging(cli.verbose, file_config.logging.directory.as_deref());

    info!("Starting Assembly Quorum");

    let Some(command) = cli.command else {
        bail!("No command given. Run with --help for usage.");
    };

    // === Dependency Injection ===
    let data = cli
        .data
        .clone()
        .or_else(|| file_config.store.path.clone())
        .ok_or_else(|| anyhow!("No snapshot file: pass --data or set [store] path"))?;
    let store = Arc::new(
        JsonSnapshotStore::open(&data)
            .await
            .with_context(|| format!("Failed to open snapshot {}", data.display()))?,
    );

    let journal = open_journal(&file_config);
    let decision_config = file_config.decision.to_decision_config();

    let (ratio_precision, _) = file_config.output.effective_precision();
    let output = OutputConfig::default()
        .with_format(
            cli.output
                .or(file_config.output.format)
                .unwrap_or_default(),
        )
        .with_color(file_config.output.color)
        .with_ratio_precision(ratio_precision);
    if !output.color {
        colored::control::set_override(false);
    }
    let formatter = ConsoleFormatter::new(output);

    let text = run(command, store, journal, decision_config, &formatter).await?;
    println!("{}", text);

    Ok(())
}

/// Console logging driven by `-v` (or `RUST_LOG`), plus an optional daily log file
fn init_logging(verbose: u8, directory: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

/// JSONL journal when configured; journaling never blocks a command
fn open_journal(config: &FileConfig) -> Arc<dyn DecisionJournal> {
    let Some(path) = &config.journal.path else {
        return Arc::new(NoDecisionJournal);
    };
    match JsonlDecisionJournal::open(path) {
        Some(journal) => {
            info!("Journaling decisions to {}", journal.path().display());
            Arc::new(journal)
        }
        None => {
            warn!("Decision journal disabled");
            Arc::new(NoDecisionJournal)
        }
    }
}

async fn run(
    command: Command,
    store: Arc<JsonSnapshotStore>,
    journal: Arc<dyn DecisionJournal>,
    config: DecisionConfig,
    formatter: &ConsoleFormatter,
) -> Result<String> {
    match command {
        Command::Decide { motion } => {
            let output = DecideMotionUseCase::new(store)
                .with_journal(journal)
                .with_config(config)
                .execute(&MotionId::new(motion))
                .await?;
            Ok(formatter.decision(&output))
        }
        Command::DecideAll { meeting } => {
            let outputs = DecideMotionUseCase::new(store)
                .with_journal(journal)
                .with_config(config)
                .execute_for_meeting(&MeetingId::new(meeting))
                .await?;
            Ok(formatter.decisions(&outputs))
        }
        Command::Resolve { motion } => {
            let resolution = DecideMotionUseCase::new(store)
                .resolve(&MotionId::new(motion))
                .await?;
            Ok(formatter.resolution(&resolution))
        }
        Command::Tally(args) => run_tally(args, store, journal, formatter).await,
        Command::Motion { action } => {
            let use_case = MotionLifecycleUseCase::new(store)
                .with_journal(journal)
                .with_config(config);
            let motion = match action {
                MotionAction::Open { motion } => use_case.open(&MotionId::new(motion)).await?,
                MotionAction::Close { motion } => use_case.close(&MotionId::new(motion)).await?,
                MotionAction::Edit(args) => {
                    use_case
                        .edit(&MotionId::new(args.motion.as_str()), args.to_patch())
                        .await?
                }
                MotionAction::Delete { motion } => {
                    let id = MotionId::new(motion);
                    use_case.delete(&id).await?;
                    return Ok(format!("Motion {} deleted", id));
                }
            };
            Ok(formatter.motion(&motion))
        }
        Command::Meeting { action } => {
            let use_case = MeetingLifecycleUseCase::new(store).with_journal(journal);
            match action {
                MeetingAction::Check { meeting, target } => {
                    let check = use_case.check(&MeetingId::new(meeting), target).await?;
                    Ok(formatter.transition_check(&check))
                }
                MeetingAction::Transition { meeting, target } => {
                    let meeting = use_case
                        .transition(&MeetingId::new(meeting), target)
                        .await?;
                    Ok(formatter.meeting(&meeting))
                }
            }
        }
    }
}

/// Apply tally edits in the order: mode, unanimous, field edits, save
async fn run_tally(
    args: TallyArgs,
    store: Arc<JsonSnapshotStore>,
    journal: Arc<dyn DecisionJournal>,
    formatter: &ConsoleFormatter,
) -> Result<String> {
    let motion = MotionId::new(args.motion);
    let use_case = ManualTallyUseCase::new(store).with_journal(journal);

    if let Some([total, for_votes, against, abstain]) = args.submit.as_deref() {
        use_case
            .submit(&motion, *total, *for_votes, *against, *abstain)
            .await?;
        let state = use_case.state(&motion).await?;
        return Ok(formatter.tally(&motion, &state, true));
    }

    if let Some(toggle) = args.manual_total {
        use_case
            .set_manual_total_mode(&motion, toggle.is_on())
            .await?;
    }
    if args.unanimous {
        use_case.unanimous(&motion).await?;
    }
    if !args.edits.is_empty() {
        use_case.edit(&motion, args.edits).await?;
    }
    if args.save {
        use_case.save(&motion).await?;
    }

    let state = use_case.state(&motion).await?;
    Ok(formatter.tally(&motion, &state, args.save))
}
