//! Play command implementation - Interactive TUI game.

use super::{CliError, game_config, seed_or_now};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use slide2048::game::IgnoreReason;
use slide2048::replay::Recording;
use slide2048::{Direction, Game, Scoreboard, Turn, TurnOutcome};
use std::io::stdout;
use std::path::Path;
use std::time::Duration;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the game cannot start, the TUI fails, or the recording
/// cannot be saved.
pub(crate) fn execute(seed: Option<u64>, size: u16, save: Option<&Path>) -> Result<(), CliError> {
    let seed = seed_or_now(seed);
    let game = Game::new(seed, game_config(size))?;
    log::info!("starting {size}x{size} game with seed {seed}");

    let app = run_tui(App::new(game))?;

    if let Some(path) = save {
        app.recording
            .save(path)
            .map_err(|e| CliError::new(format!("Failed to save recording: {e}")))?;
        println!("Recording saved to: {}", path.display());
    }
    println!(
        "Final score: {} (best this session: {})",
        app.scoreboard.score(),
        app.scoreboard.best()
    );
    Ok(())
}

/// App state for the TUI.
struct App {
    game: Game,
    scoreboard: Scoreboard,
    recording: Recording,
    status: String,
}

impl App {
    fn new(game: Game) -> Self {
        let recording = Recording::new(game.seed(), *game.config());
        Self {
            game,
            scoreboard: Scoreboard::new(),
            recording,
            status: String::from("Slide the tiles to merge equal values"),
        }
    }

    fn play(&mut self, direction: Direction) {
        let turn = self.game.play(direction);
        self.apply(&turn);
    }

    fn play_key(&mut self, key: char) {
        if let Some(turn) = self.game.play_key(key) {
            self.apply(&turn);
        }
    }

    fn apply(&mut self, turn: &Turn) {
        self.recording.record(turn);
        self.status = match turn.outcome {
            TurnOutcome::Moved => {
                self.scoreboard.add(turn.score_delta);
                if turn.game_over {
                    String::from("No moves left! Press [n] for a new game")
                } else if turn.score_delta > 0 {
                    format!("{}: +{}", turn.direction, turn.score_delta)
                } else {
                    turn.direction.to_string()
                }
            }
            TurnOutcome::Ignored(IgnoreReason::Blocked) => {
                format!("Nothing moves {}", turn.direction)
            }
            TurnOutcome::Ignored(IgnoreReason::GameOver) => {
                String::from("Game over. Press [n] for a new game")
            }
        };
    }

    fn new_game(&mut self) {
        let seed = fastrand::u64(..);
        self.game.new_game(seed);
        self.scoreboard.reset();
        self.recording = Recording::new(seed, *self.game.config());
        self.status = format!("New game (seed {seed})");
        log::info!("new game with seed {seed}");
    }
}

fn run_tui(mut app: App) -> Result<App, CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map(|()| app)
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), CliError> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('n') => app.new_game(),
                KeyCode::Up => app.play(Direction::Up),
                KeyCode::Down => app.play(Direction::Down),
                KeyCode::Left => app.play(Direction::Left),
                KeyCode::Right => app.play(Direction::Right),
                KeyCode::Char(c) => app.play_key(c),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Board
            Constraint::Length(3), // Status
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_board(f, chunks[1], app);
    render_status(f, chunks[2], app);
    render_footer(f, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let state = if app.game.is_game_over() {
        "GAME OVER"
    } else {
        "PLAYING"
    };
    let title = format!(
        " slide2048 | Score: {} | Best: {} | Turn {} | {state} ",
        app.scoreboard.score(),
        app.scoreboard.best(),
        app.game.turns()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let grid = app.game.grid();
    let width = grid.max_value().to_string().len().max(4) + 2;

    let mut lines: Vec<Line> = Vec::new();
    for (i, row) in grid.rows().into_iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        let spans: Vec<Span> = row
            .into_iter()
            .map(|value| {
                let text = if value == 0 {
                    String::from("·")
                } else {
                    value.to_string()
                };
                Span::styled(format!("{text:^width$}"), tile_style(value))
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let board = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Board "));

    f.render_widget(board, area);
}

fn tile_style(value: u32) -> Style {
    let color = match value {
        0 => Color::DarkGray,
        2 => Color::White,
        4 => Color::LightYellow,
        8 => Color::Yellow,
        16 => Color::LightRed,
        32 => Color::Red,
        64 => Color::LightMagenta,
        128 => Color::Magenta,
        256 => Color::LightCyan,
        512 => Color::Cyan,
        1024 => Color::LightGreen,
        2048 => Color::Green,
        _ => Color::LightBlue,
    };
    let style = Style::default().fg(color);
    if value >= 128 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let status = Paragraph::new(app.status.as_str())
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(status, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let controls = " [←↑↓→ / wasd / hjkl] Move  [n] New game  [q] Quit ";

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
