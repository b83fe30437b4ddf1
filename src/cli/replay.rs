//! Replay command implementation.

use super::CliError;
use slide2048::replay::{Recording, ReplayEngine, render_ascii};
use std::path::Path;

/// Execute the replay command.
///
/// Prints the board at `turn` (default: the last turn), or every turn with
/// `all`.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or does not replay.
pub(crate) fn execute(
    recording_path: &Path,
    turn: Option<usize>,
    all: bool,
) -> Result<(), CliError> {
    let recording = Recording::load(recording_path).map_err(|e| {
        CliError::new(format!(
            "Failed to load recording {}: {e}",
            recording_path.display()
        ))
    })?;
    log::info!(
        "loaded recording: seed {}, {} moves",
        recording.seed,
        recording.len()
    );

    let mut engine = ReplayEngine::new(recording)?;

    if all {
        return print_every_turn(&mut engine);
    }

    let target = turn.unwrap_or(engine.recording().len());
    engine.goto_turn(target)?;
    print_turn(&engine);
    Ok(())
}

fn print_every_turn(engine: &mut ReplayEngine) -> Result<(), CliError> {
    print_turn(engine);
    while !engine.is_finished() {
        let turn = engine.step_forward()?;
        println!("{} (+{})", turn.direction, turn.score_delta);
        print_turn(engine);
    }
    Ok(())
}

fn print_turn(engine: &ReplayEngine) {
    let game = engine.game();
    println!("Turn {}/{}", engine.turn(), engine.recording().len());
    print!("{}", render_ascii(game.grid(), game.score()));
    if game.is_game_over() {
        println!("GAME OVER");
    }
    println!();
}
