//! CLI command implementations for slide2048.

pub(crate) mod batch;
pub(crate) mod play;
pub(crate) mod replay;
pub(crate) mod run;

mod output;

use clap::ValueEnum;
use slide2048::GameConfig;
use slide2048::strategy::StrategyKind;
use std::error::Error;
use std::fmt;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `batch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Automatic player selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StrategyArg {
    /// Uniformly random legal moves.
    Random,
    /// Best immediate merge score.
    Greedy,
    /// Keep tiles in the bottom-left corner.
    Corner,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Random => StrategyKind::Random,
            StrategyArg::Greedy => StrategyKind::Greedy,
            StrategyArg::Corner => StrategyKind::Corner,
        }
    }
}

/// Game config for a board of `size`, other settings default.
pub(crate) fn game_config(size: u16) -> GameConfig {
    GameConfig {
        size,
        ..GameConfig::default()
    }
}

/// Use the given seed, or derive one from the clock.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn seed_or_now(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<slide2048::GameError> for CliError {
    fn from(e: slide2048::GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<slide2048::replay::ReplayError> for CliError {
    fn from(e: slide2048::replay::ReplayError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<flexi_logger::FlexiLoggerError> for CliError {
    fn from(e: flexi_logger::FlexiLoggerError) -> Self {
        Self::new(format!("Failed to start logger: {e}"))
    }
}
