//! Run command implementation.

use super::output::{JsonGameRecord, format_record_text};
use super::{CliError, OutputFormat, StrategyArg, game_config, seed_or_now};
use slide2048::batch::play_out;
use slide2048::replay::Recording;
use slide2048::strategy::StrategyKind;
use std::path::Path;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the game cannot start or the recording cannot be saved.
pub(crate) fn execute(
    seed: Option<u64>,
    size: u16,
    strategy: StrategyArg,
    turns: u32,
    format: OutputFormat,
    save: Option<&Path>,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = seed_or_now(seed);
    let config = game_config(size);
    let strategy = StrategyKind::from(strategy);

    if !quiet {
        println!("Running {size}x{size} game with seed {seed} ({strategy})...");
        println!();
    }

    let record = play_out(seed, config, strategy, turns)?;

    // Save recording if requested
    if let Some(save_path) = save {
        let mut recording = Recording::new(seed, config);
        recording.moves.clone_from(&record.moves);
        recording
            .save(save_path)
            .map_err(|e| CliError::new(format!("Failed to save recording: {e}")))?;
        if !quiet {
            println!("Recording saved to: {}", save_path.display());
            println!();
        }
    }

    match format {
        OutputFormat::Text => {
            print!("{}", format_record_text(&record));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonGameRecord::from_record(&record))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
