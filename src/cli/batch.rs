//! Batch command implementation.

use super::output::{JsonBatchResult, format_batch_csv, format_batch_text};
use super::{BatchFormat, CliError, StrategyArg, game_config, seed_or_now};
use indicatif::{ProgressBar, ProgressStyle};
use slide2048::batch::{BatchConfig, BatchStats, run_batch};
use slide2048::strategy::StrategyKind;
use std::time::Instant;

/// Games per parallel chunk when a progress bar is shown.
const PROGRESS_CHUNK: u64 = 64;

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the game config is invalid.
#[allow(clippy::too_many_arguments, clippy::cast_precision_loss)]
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    size: u16,
    strategy: StrategyArg,
    max_turns: u32,
    format: BatchFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Set thread pool size if specified
    if let Some(num_threads) = threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
    {
        log::warn!("could not resize thread pool: {e}");
    }

    let base_seed = seed_or_now(seed);
    let strategy = StrategyKind::from(strategy);
    let config = BatchConfig {
        game: game_config(size),
        strategy,
        max_turns,
    };

    let start = Instant::now();
    let stats = if progress {
        run_with_progress(base_seed, games, &config)?
    } else {
        run_batch(base_seed, games, &config)?
    };
    let duration = start.elapsed();

    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        BatchFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats, strategy));
            println!();
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec)",
                duration.as_secs_f64()
            );
        }
        BatchFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonBatchResult::from_stats(&stats, strategy))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        BatchFormat::Csv => {
            print!("{}", format_batch_csv(&stats, strategy));
        }
    }

    Ok(())
}

/// Run the batch in parallel chunks, advancing a progress bar per chunk.
fn run_with_progress(
    base_seed: u64,
    games: u64,
    config: &BatchConfig,
) -> Result<BatchStats, CliError> {
    let pb = ProgressBar::new(games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})",
            )
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-"),
    );

    let mut stats = BatchStats::default();
    let mut done = 0;
    while done < games {
        let chunk = PROGRESS_CHUNK.min(games - done);
        let part = run_batch(base_seed.wrapping_add(done), chunk, config)?;
        stats.merge(&part);
        done += chunk;
        pb.inc(chunk);
    }
    pb.finish_with_message("done");

    Ok(stats)
}
