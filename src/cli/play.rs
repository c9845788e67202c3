//! Play command implementation - interactive TUI.

use super::{seed_or_random, CliError, SettingsArgs};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lucky_seven::game::{Coord, FIRST_PLAYABLE_ROW};
use lucky_seven::view::{cell_label, member_number};
use lucky_seven::{Controller, GameState, Phase};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::collections::VecDeque;
use std::io::stdout;
use std::time::Duration;

/// Cues kept in the log panel.
const CUE_LOG_LEN: usize = 12;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the settings cannot be loaded or the TUI fails.
pub(crate) fn execute(seed: Option<u64>, settings: &SettingsArgs) -> Result<(), CliError> {
    let settings = settings.resolve()?;
    let seed = seed_or_random(seed);
    tracing::info!(seed, "starting interactive game");
    run_tui(Controller::new(settings, seed))
}

/// App state for the TUI.
struct App {
    controller: Controller,
    cursor: Coord,
    cues: VecDeque<String>,
}

impl App {
    fn new(controller: Controller) -> Self {
        let mut app = Self {
            controller,
            cursor: Coord::new(1, FIRST_PLAYABLE_ROW),
            cues: VecDeque::with_capacity(CUE_LOG_LEN),
        };
        app.collect_cues();
        app
    }

    fn move_cursor(&mut self, dx: i8, dy: i8) {
        let grid = &self.controller.state().grid;
        let next = self.cursor.offset(dx, dy);
        if let Some(next) = next.filter(|c| grid.in_bounds(*c) && c.y >= FIRST_PLAYABLE_ROW) {
            self.cursor = next;
        }
    }

    fn click(&mut self) {
        self.controller.on_cell_clicked(self.cursor.x, self.cursor.y);
    }

    fn collect_cues(&mut self) {
        for cue in self.controller.drain_cues() {
            if self.cues.len() == CUE_LOG_LEN {
                self.cues.pop_front();
            }
            self.cues.push_back(cue.to_string());
        }
    }
}

fn run_tui(controller: Controller) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(controller);

    loop {
        terminal.draw(|f| ui(f, &app)).map_err(|e| CliError::new(e.to_string()))?;

        if event::poll(Duration::from_millis(100)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Up => app.move_cursor(0, -1),
                KeyCode::Down => app.move_cursor(0, 1),
                KeyCode::Left => app.move_cursor(-1, 0),
                KeyCode::Right => app.move_cursor(1, 0),
                KeyCode::Enter | KeyCode::Char(' ') => app.click(),
                KeyCode::Char('n') => {
                    app.controller.on_advance_phase();
                }
                KeyCode::Char('u') => app.controller.on_undo(),
                KeyCode::Char('r') => app.controller.on_reset(),
                KeyCode::Char('f') => {
                    app.controller.on_flip_up();
                }
                KeyCode::Char('d') => {
                    app.controller.on_flip_down();
                }
                KeyCode::Esc | KeyCode::Char('c') => app.controller.on_cancel_selection(),
                _ => {}
            }
            app.collect_cues();
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(12),    // Main content
            Constraint::Length(3),  // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app.controller.state());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(30)])
        .split(chunks[1]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    render_board(f, main_chunks[0], app);
    render_details(f, side_chunks[0], app.controller.state());
    render_cues(f, side_chunks[1], app);
    render_footer(f, chunks[2], app.controller.state());
}

fn render_header(f: &mut Frame, area: Rect, state: &GameState) {
    let mut spans = vec![Span::styled(
        format!(" Turn {} ", state.turn),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    for phase in Phase::ALL {
        let style = if phase == state.phase {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {phase} "), style));
    }
    spans.push(Span::raw(format!(
        " | Deck {} | Final turns {} | Score {} ",
        state.deck.len(),
        state.final_turns.remaining,
        state.final_turns.score
    )));
    if state.is_game_over() {
        let color = if state.outcome.is_loss() { Color::Red } else { Color::Green };
        spans.push(Span::styled(
            format!(" GAME OVER: {} ", state.outcome),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Background for a cell given the current selection.
fn cell_style(state: &GameState, coord: Coord, cursor: Coord) -> Style {
    let selection = &state.selection;
    let mut style = Style::default();
    if selection.move_targets.contains(&coord) {
        style = style.bg(Color::Blue);
    } else if selection.attack_targets.contains(&coord) {
        style = style.bg(Color::Red);
    } else if state.pending_columns.contains(&coord) {
        style = style.bg(Color::Magenta);
    }
    if selection.cell == Some(coord) {
        style = style.bg(Color::Green);
    }
    if coord == cursor {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    style
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let state = app.controller.state();
    let mut lines = vec![Line::from("")];

    let mut ruler = String::from("    ");
    for x in 0..state.grid.columns() {
        ruler.push_str(&format!("  {x}  "));
    }
    lines.push(Line::from(Span::styled(ruler, Style::default().fg(Color::DarkGray))));

    for y in FIRST_PLAYABLE_ROW..state.grid.rows() {
        let mut spans = vec![Span::styled(
            format!("  {y} "),
            Style::default().fg(Color::DarkGray),
        )];
        for x in 0..state.grid.columns() {
            let coord = Coord::new(x, y);
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                cell_label(state, coord),
                cell_style(state, coord, app.cursor),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Board "));
    f.render_widget(board, area);
}

fn render_details(f: &mut Frame, area: Rect, state: &GameState) {
    let mut lines = Vec::new();

    if let Some(id) = state.selected_member() {
        let member = state.member(id);
        lines.push(Line::from(Span::styled(
            format!("{} {}", member_number(id), member.name),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!(
            "  {}  strength {}",
            member.posture_str(),
            member.get_strength()
        )));
        for text in member.description() {
            lines.push(Line::from(format!("  {text}")));
        }
        lines.push(Line::from(""));
    }

    for &id in &state.selection.threats {
        let threat = state.threat(id);
        lines.push(Line::from(Span::styled(
            format!("{} (strength {})", threat.kind, threat.get_strength()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        for text in threat.kind.description() {
            lines.push(Line::from(format!("  {text}")));
        }
        lines.push(Line::from(""));
    }

    if lines.is_empty() {
        for member in state.squad_members() {
            lines.push(Line::from(format!(
                "{:<14} {:<5} str {}",
                member.name,
                member.posture_str(),
                member.get_strength()
            )));
        }
    }

    let details = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Cards "))
        .wrap(Wrap { trim: false });
    f.render_widget(details, area);
}

fn render_cues(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app.cues.iter().rev().map(|c| Line::from(c.as_str())).collect();
    let log = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Events "));
    f.render_widget(log, area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &GameState) {
    let controls = if state.is_game_over() {
        " [q] Quit  [r] New game  [arrows] Move  [Enter] Inspect "
    } else {
        " [q] Quit  [arrows] Move  [Enter] Click  [n] Next phase  [u] Undo  [f] Flip up  [d] Flip down  [c] Cancel  [r] New game "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
