//! Full-screen front end built on Ratatui.
//!
//! # State Machine
//! - `Menu` → `EnteringSolution` → `MachinePlaying` → `RoundOver` → back to `Menu`
//! - `Menu` → `HumanGuessing` → `RoundOver` → back to `Menu`
//! - `Menu` → `About` → back to `Menu`

use crate::art::{StageColor, body, stage_color};
use crate::game_state::MAX_MISSES;
use crate::session::{
    GameInterface, MenuChoice, Outcome, Player, RoundView, UserAction, parse_menu_choice,
};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_SOLUTION_LEN: usize = 32;
const GALLOWS_WIDTH: u16 = 20;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const FAILURE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TuiState {
    Menu,
    EnteringSolution,
    MachinePlaying,
    HumanGuessing,
    RoundOver,
    About,
}

impl TuiState {
    fn instructions(self) -> &'static str {
        match self {
            Self::Menu => "1-4: Choose | ESC: Quit",
            Self::EnteringSolution => {
                "Type a word | ENTER: Start (empty for a random word) | BACKSPACE: Delete | ESC: Back"
            }
            Self::MachinePlaying => "The machine is thinking... | ESC: Stop the round",
            Self::HumanGuessing => "Type a letter to guess | ESC: Give up",
            Self::RoundOver | Self::About => "Press any key to return to the menu",
        }
    }
}

fn stage_style(color: StageColor) -> Style {
    let fg = match color {
        StageColor::Green => Color::Green,
        StageColor::Blue => Color::Blue,
        StageColor::Cyan => Color::Cyan,
        StageColor::White => Color::White,
        StageColor::Yellow => Color::Yellow,
        StageColor::Red => Color::Red,
    };
    Style::new().fg(fg)
}

/// Revealed pattern with a space between letters so blanks stay countable.
fn spaced(revealed: &str) -> String {
    revealed
        .chars()
        .map(|c| c.to_ascii_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn guesses_line(guesses: &[char]) -> String {
    if guesses.is_empty() {
        "-".to_string()
    } else {
        guesses
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn outcome_line(player: Player, outcome: Outcome) -> (&'static str, Style) {
    match (player, outcome) {
        (Player::Machine, Outcome::Won) => ("Machine wins!", SUCCESS_STYLE),
        (Player::Machine, Outcome::Lost) => ("Machine loses!", FAILURE_STYLE),
        (Player::Human, Outcome::Won) => ("You win!", SUCCESS_STYLE),
        (Player::Human, Outcome::Lost) => ("You lose!", FAILURE_STYLE),
        (_, Outcome::Abandoned) => ("Round abandoned.", MESSAGE_STYLE),
    }
}

const HUMAN_GREETING: &str = "Alright, time to test your ability at hangman!";

/// Greeting for a human round, shown only until the first guess lands.
fn human_turn_message(view: &RoundView) -> Option<&'static str> {
    view.guesses.is_empty().then_some(HUMAN_GREETING)
}

/// A plain Esc press, which leaves whatever the user is in.
fn is_leave_key(key: &KeyEvent) -> bool {
    key.kind == event::KeyEventKind::Press
        && key.code == KeyCode::Esc
        && !TuiInterface::has_modifier_keys(key)
}

/// Borrowed view of everything the renderer needs.
struct RenderContext<'a> {
    state: TuiState,
    view: Option<&'a RoundView>,
    input: &'a str,
    body_text: &'a str,
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    status: &'a str,
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    view: Option<RoundView>,
    input: String,
    body_text: String,
    message: String,
    message_style: Style,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            state: TuiState::Menu,
            view: None,
            input: String::new(),
            body_text: String::new(),
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
            status: "Welcome to automatic-hangman!".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: self.state,
            view: self.view.as_ref(),
            input: &self.input,
            body_text: &self.body_text,
            message: &self.message,
            message_style: self.message_style,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(10),   // Board
                Constraint::Length(5), // Messages
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        match ctx.state {
            TuiState::Menu => Self::render_menu(f, chunks[1]),
            TuiState::About => Self::render_about(f, chunks[1], ctx.body_text),
            TuiState::EnteringSolution => Self::render_solution_prompt(f, chunks[1], ctx.input),
            TuiState::MachinePlaying | TuiState::HumanGuessing | TuiState::RoundOver => {
                Self::render_board(f, chunks[1], ctx.view);
            }
        }
        Self::render_messages(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("AUTOMATIC HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_menu(f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled("Choose one of the following options.", HEADER_STYLE)),
            Line::from(""),
            Line::from("  1. Let the machine play"),
            Line::from("  2. Play hangman yourself"),
            Line::from("  3. Learn about this program"),
            Line::from("  4. Quit"),
        ];
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Menu").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_about(f: &mut Frame, area: Rect, about: &str) {
        let paragraph = Paragraph::new(about)
            .block(Block::default().title("About").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_solution_prompt(f: &mut Frame, area: Rect, input: &str) {
        let lines = vec![
            Line::from("Type a word for the machine to solve,"),
            Line::from("or leave it empty for a random word:"),
            Line::from(""),
            Line::from(Span::styled(format!("> {input}_"), HEADER_STYLE)),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Solution").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_board(f: &mut Frame, area: Rect, view: Option<&RoundView>) {
        let Some(view) = view else {
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GALLOWS_WIDTH), Constraint::Min(10)])
            .split(area);

        let gallows = Paragraph::new(body(view.misses))
            .style(stage_style(stage_color(view.misses)))
            .block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(gallows, columns[0]);

        let mut lines = Vec::new();
        if let Some(solution) = &view.solution {
            lines.push(Line::from(format!("Solution: {solution}")));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(spaced(&view.revealed), HEADER_STYLE)));
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Guesses: {}", guesses_line(&view.guesses))));
        lines.push(Line::from(format!("Incorrect guesses: {}", view.misses)));

        let word = Paragraph::new(lines)
            .block(Block::default().title("Word").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(word, columns[1]);
    }

    fn render_messages(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();
        if !ctx.message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.message, ctx.message_style)));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let paragraph = Paragraph::new(state.instructions())
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Draws, then waits for the next key press. Non-key events, key
    /// releases and chords with Alt or Control are skipped.
    fn next_key(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            self.draw()?;
            if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    if Self::has_modifier_keys(&key) {
                        debug_log!("next_key() - Ignoring chord: {:?}", key);
                        continue;
                    }
                    debug_log!("next_key() - Key: {:?}", key.code);
                    return Ok(key);
                }
                other => {
                    debug_log!("next_key() - Ignoring event: {:?}", other);
                }
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn wait_for_any_key(&mut self) {
        if let Err(e) = self.next_key() {
            debug_log!("wait_for_any_key() - Input error: {}", e);
        }
    }

    fn show_message(&mut self, message: &str, style: Style) {
        self.message = message.to_string();
        self.message_style = style;
    }
}

impl GameInterface for TuiInterface {
    fn read_menu_choice(&mut self) -> MenuChoice {
        self.state = TuiState::Menu;
        self.view = None;
        self.status = "Choose an option".to_string();

        let key = match self.next_key() {
            Ok(key) => key,
            Err(e) => {
                info_log!("read_menu_choice() - Input error, quitting: {}", e);
                return MenuChoice::Quit;
            }
        };
        self.error_message.clear();
        self.message.clear();
        match key.code {
            KeyCode::Esc => MenuChoice::Quit,
            KeyCode::Char(c) => parse_menu_choice(&c.to_string()),
            _ => MenuChoice::Invalid,
        }
    }

    fn read_solution(&mut self) -> Option<String> {
        self.state = TuiState::EnteringSolution;
        self.input.clear();
        self.status = "Waiting for a solution".to_string();

        loop {
            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    info_log!("read_solution() - Input error, leaving round: {}", e);
                    return None;
                }
            };
            self.error_message.clear();
            match key.code {
                KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                    if self.input.len() < MAX_SOLUTION_LEN {
                        self.input.push(c.to_ascii_lowercase());
                    } else {
                        self.error_message =
                            format!("Words are limited to {MAX_SOLUTION_LEN} letters.");
                    }
                }
                KeyCode::Char(c) => {
                    self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                }
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Enter => return Some(std::mem::take(&mut self.input)),
                KeyCode::Esc => {
                    self.input.clear();
                    return None;
                }
                _ => {}
            }
        }
    }

    fn read_letter(&mut self, view: &RoundView) -> Option<UserAction> {
        self.state = TuiState::HumanGuessing;
        self.view = Some(view.clone());

        let key = match self.next_key() {
            Ok(key) => key,
            Err(e) => {
                info_log!("read_letter() - Input error, leaving round: {}", e);
                return Some(UserAction::Quit);
            }
        };
        self.error_message.clear();
        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                let letter = c.to_ascii_lowercase();
                self.status = format!("Guessed '{letter}'");
                Some(UserAction::Guess(letter))
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                None
            }
            KeyCode::Esc => Some(UserAction::Quit),
            _ => None,
        }
    }

    fn display_round(&mut self, view: &RoundView, player: Player) {
        self.view = Some(view.clone());
        match player {
            Player::Machine => {
                self.state = TuiState::MachinePlaying;
                self.status = format!("Machine guess {}", view.guesses.len() + 1);
            }
            Player::Human => {
                self.state = TuiState::HumanGuessing;
                match human_turn_message(view) {
                    Some(text) => self.show_message(text, MESSAGE_STYLE),
                    None => self.message.clear(),
                }
                self.status = format!("{} misses left", MAX_MISSES.saturating_sub(view.misses));
            }
        }
        self.draw_or_log();
    }

    fn display_outcome(&mut self, view: &RoundView, player: Player, outcome: Outcome) {
        self.view = Some(view.clone());
        self.state = TuiState::RoundOver;
        let (text, style) = outcome_line(player, outcome);
        self.show_message(text, style);
        self.status = "Round over".to_string();
        self.wait_for_any_key();
        self.message.clear();
    }

    fn display_about(&mut self, about: &str) {
        self.state = TuiState::About;
        self.body_text = about.to_string();
        self.status = "About".to_string();
        self.wait_for_any_key();
    }

    fn display_invalid_choice(&mut self) {
        self.error_message = "Invalid choice, try again.".to_string();
        self.draw_or_log();
    }

    fn display_message(&mut self, message: &str) {
        self.show_message(message, MESSAGE_STYLE);
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.show_message("Exiting...", MESSAGE_STYLE);
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }

    /// Keeps the screen up for `delay`. Esc ends the wait with a quit
    /// request; other keys are swallowed so they don't leak into the next
    /// prompt.
    fn pause(&mut self, delay: Duration) -> Option<UserAction> {
        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            match event::poll(remaining) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if is_leave_key(&key) => {
                        info_log!("pause() - Esc pressed, stopping machine round");
                        return Some(UserAction::Quit);
                    }
                    Ok(event) => {
                        debug_log!("pause() - Ignoring event: {:?}", event);
                    }
                    Err(e) => {
                        debug_log!("pause() - Read error: {}", e);
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    debug_log!("pause() - Poll error: {}", e);
                    return None;
                }
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaced_pattern() {
        assert_eq!(spaced("_a_"), "_ A _");
        assert_eq!(spaced(""), "");
    }

    #[test]
    fn test_guesses_line() {
        assert_eq!(guesses_line(&[]), "-");
        assert_eq!(guesses_line(&['e', 'x']), "e x");
    }

    #[test]
    fn test_stage_style_maps_colors() {
        assert_eq!(stage_style(StageColor::Red), Style::new().fg(Color::Red));
        assert_eq!(stage_style(stage_color(0)), Style::new().fg(Color::Green));
    }

    #[test]
    fn test_outcome_lines() {
        assert_eq!(outcome_line(Player::Machine, Outcome::Won).0, "Machine wins!");
        assert_eq!(outcome_line(Player::Human, Outcome::Lost).0, "You lose!");
        assert_eq!(
            outcome_line(Player::Human, Outcome::Abandoned).0,
            "Round abandoned."
        );
    }

    #[test]
    fn test_human_greeting_only_before_first_guess() {
        let mut view = RoundView {
            solution: None,
            revealed: "___".to_string(),
            guesses: Vec::new(),
            misses: 0,
        };
        assert_eq!(human_turn_message(&view), Some(HUMAN_GREETING));

        view.guesses.push('q');
        view.misses = 1;
        assert_eq!(human_turn_message(&view), None);
    }

    #[test]
    fn test_only_plain_esc_press_leaves() {
        use crossterm::event::KeyEventKind;

        assert!(is_leave_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!is_leave_key(&KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE
        )));
        assert!(!is_leave_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!is_leave_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::ALT)));

        let mut release = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!is_leave_key(&release));
    }

    #[test]
    fn test_every_state_has_instructions() {
        for state in [
            TuiState::Menu,
            TuiState::EnteringSolution,
            TuiState::MachinePlaying,
            TuiState::HumanGuessing,
            TuiState::RoundOver,
            TuiState::About,
        ] {
            assert!(!state.instructions().is_empty());
        }
    }
}
