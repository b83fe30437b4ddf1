//! slide2048 CLI - Play, autoplay and replay sliding-tile puzzle games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod logging;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// slide2048 - A deterministic sliding-tile merge puzzle
#[derive(Parser, Debug)]
#[command(name = "slide2048")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// More log output (-v info, -vv debug, -vvv trace); `RUST_LOG` overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Write rotated log files to this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Board edge length (default: 4)
        #[arg(long, default_value = "4")]
        size: u16,

        /// Save the game in progress to a recording file on quit
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Autoplay a single game with a built-in strategy
    Run {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Board edge length (default: 4)
        #[arg(long, default_value = "4")]
        size: u16,

        /// Automatic player
        #[arg(long, default_value = "corner")]
        strategy: cli::StrategyArg,

        /// Maximum turns (default: 100000)
        #[arg(short, long, default_value = "100000")]
        turns: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save recording to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Suppress progress messages
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the board from a recorded game
    Replay {
        /// Recording file (.json)
        #[arg(required = true)]
        recording: PathBuf,

        /// Show the board after this many turns (default: the end)
        #[arg(short, long, conflicts_with = "all")]
        turn: Option<usize>,

        /// Show every turn
        #[arg(short, long)]
        all: bool,
    },

    /// Autoplay many games in parallel and aggregate statistics
    Batch {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Board edge length (default: 4)
        #[arg(long, default_value = "4")]
        size: u16,

        /// Automatic player
        #[arg(long, default_value = "corner")]
        strategy: cli::StrategyArg,

        /// Maximum turns per game (default: 100000)
        #[arg(short = 't', long, default_value = "100000")]
        max_turns: u32,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // The TUI owns the terminal, so it only logs to files
    let stderr_allowed = !matches!(args.command, Commands::Play { .. });
    let _logger = match logging::init(args.verbose, args.log_dir.as_deref(), stderr_allowed) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: {}", cli::CliError::from(e));
            return ExitCode::FAILURE;
        }
    };

    let result = match args.command {
        Commands::Play { seed, size, save } => cli::play::execute(seed, size, save.as_deref()),

        Commands::Run {
            seed,
            size,
            strategy,
            turns,
            format,
            save,
            quiet,
        } => cli::run::execute(seed, size, strategy, turns, format, save.as_deref(), quiet),

        Commands::Replay {
            recording,
            turn,
            all,
        } => cli::replay::execute(&recording, turn, all),

        Commands::Batch {
            games,
            seed,
            threads,
            size,
            strategy,
            max_turns,
            format,
            progress,
        } => cli::batch::execute(games, seed, threads, size, strategy, max_turns, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
