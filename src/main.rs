//! fileselect - select files in a directory and copy, move or delete them in batches.
//!
//! Usage:
//!   fsel [PATH]                      Interactive shell on PATH
//!   fsel ls [PATH]                   List a directory
//!   fsel copy [-C DIR] [--to DEST] (--all | --glob PAT | NAME...)
//!   fsel move [-C DIR] [--to DEST] (--all | --glob PAT | NAME...)
//!   fsel delete [-C DIR] (--all | --glob PAT | NAME...)
//!   fsel --help                      Show help

mod logging;
mod output;
mod settings;
mod shell;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};

use fileselect_core::{EngineError, OperationKind, RandomSource};
use fileselect_engine::SelectionEngine;
use fileselect_ops::{ConflictPolicy, LocalExplorer, LocalManipulator, SeededRandom, ThreadRandom};

use crate::settings::UserSettings;

/// Engine wired to the local filesystem.
pub type LocalEngine = SelectionEngine<LocalExplorer, LocalManipulator, Box<dyn RandomSource>>;

#[derive(Parser)]
#[command(
    name = "fileselect",
    version,
    about = "Select files and copy, move or delete them in batches",
    long_about = "fileselect keeps a selection of entries in one directory and applies \
                  copy, move or delete to all of them at once.\n\n\
                  Run `fsel [PATH]` for the interactive shell, or use subcommands for \
                  one-shot operations."
)]
struct Cli {
    /// Directory to open (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Move deleted entries to the trash instead of removing them
    #[arg(long, global = true)]
    trash: bool,

    /// What to do when a copy or move target exists (skip, overwrite, auto-rename)
    #[arg(long, global = true)]
    conflict: Option<ConflictPolicy>,

    /// Leave entries starting with '.' out of listings
    #[arg(long, global = true)]
    no_hidden: bool,

    /// Seed for generated destination names
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List a directory
    Ls {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Copy entries into a destination directory
    Copy {
        #[command(flatten)]
        targets: Targets,

        /// Destination directory (generated inside DIR when omitted)
        #[arg(short, long)]
        to: Option<PathBuf>,
    },

    /// Move entries into a destination directory
    Move {
        #[command(flatten)]
        targets: Targets,

        /// Destination directory (generated inside DIR when omitted)
        #[arg(short, long)]
        to: Option<PathBuf>,
    },

    /// Delete entries
    Delete {
        #[command(flatten)]
        targets: Targets,
    },

    /// Write the effective settings to the settings file
    SaveSettings,
}

/// Which entries a one-shot command works on.
#[derive(Args)]
struct Targets {
    /// Directory holding the entries
    #[arg(short = 'C', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Select every entry
    #[arg(short, long)]
    all: bool,

    /// Select entries matching a glob pattern
    #[arg(short, long)]
    glob: Option<String>,

    /// Entry names to select
    names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;

    let stored = match &cli.config {
        Some(path) => UserSettings::load_from(path),
        None => UserSettings::load(),
    };
    let settings = effective_settings(&cli, stored);
    let mut engine = build_engine(&cli, &settings)?;

    match cli.command {
        Some(Command::Ls { ref path }) => {
            let entries = engine
                .load_directory(path)
                .with_context(|| format!("Cannot list {}", path.display()))?;
            output::print_entries(&mut io::stdout(), &entries, cli.format)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Copy { ref targets, ref to }) => {
            run_batch(&mut engine, targets, OperationKind::Copy, to.as_deref(), cli.format)
        }
        Some(Command::Move { ref targets, ref to }) => {
            run_batch(&mut engine, targets, OperationKind::Move, to.as_deref(), cli.format)
        }
        Some(Command::Delete { ref targets }) => {
            run_batch(&mut engine, targets, OperationKind::Delete, None, cli.format)
        }
        Some(Command::SaveSettings) => {
            match &cli.config {
                Some(path) => settings.save_to(path),
                None => settings.save(),
            }
            .context("Failed to save settings")?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let path = cli.path.canonicalize().context("Invalid path")?;
            engine.load_directory(path).context("Cannot open directory")?;
            let stdin = io::stdin();
            shell::run(&mut engine, stdin.lock(), io::stdout(), cli.format)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Apply command-line flags on top of the stored settings.
fn effective_settings(cli: &Cli, mut settings: UserSettings) -> UserSettings {
    if cli.no_hidden {
        settings.include_hidden = false;
    }
    if cli.trash {
        settings.use_trash = true;
    }
    if let Some(conflict) = cli.conflict {
        settings.conflict = conflict;
    }
    settings
}

/// Build the engine from the effective settings.
fn build_engine(cli: &Cli, settings: &UserSettings) -> Result<LocalEngine> {
    let config = settings.engine_config()?;

    let manipulator = LocalManipulator::new()
        .with_trash(settings.use_trash)
        .with_conflict(settings.conflict);

    let random: Box<dyn RandomSource> = match cli.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };

    SelectionEngine::with_config(LocalExplorer, manipulator, random, config)
        .context("Invalid engine configuration")
}

/// Load, select and run one batch operation.
fn run_batch(
    engine: &mut LocalEngine,
    targets: &Targets,
    kind: OperationKind,
    destination: Option<&std::path::Path>,
    format: OutputFormat,
) -> Result<ExitCode> {
    engine
        .load_directory(&targets.dir)
        .with_context(|| format!("Cannot open {}", targets.dir.display()))?;

    if targets.all {
        engine.select_all();
    }
    if let Some(pattern) = &targets.glob {
        engine.select_matching(pattern)?;
    }
    engine.select_many(&targets.names)?;

    let outcome = match kind {
        OperationKind::Copy => engine.copy_selection(destination),
        OperationKind::Move => engine.move_selection(destination),
        OperationKind::Delete => engine.delete_selection(),
    };

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(EngineError::NothingSelected) => {
            eprintln!("Nothing selected: pass entry names, --glob or --all");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    output::print_outcome(&mut io::stdout(), &outcome, format)?;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
