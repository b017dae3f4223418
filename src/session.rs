//! Menu loop and round drivers shared by the line-mode and full-screen
//! front ends.
//!
//! A [`Session`] owns the [`GameState`] / [`Solver`] pair for the lifetime of
//! the program and talks to the user only through [`GameInterface`].

use crate::game_state::GameState;
use crate::solver::Solver;
use crate::wordbank::Dictionary;
use crate::{debug_log, info_log};
use std::time::Duration;

pub const ABOUT: &str = concat!(
    "automatic-hangman ",
    env!("CARGO_PKG_VERSION"),
    "\n\n",
    "A hangman game that a machine can play better than you can, and that\n",
    "you can play too.\n\n",
    "The machine keeps every dictionary word that still fits what it has\n",
    "seen and guesses the letter that appears in the most of them.\n",
    "The sixth miss loses the round.\n\n",
    "The built-in word list is small. For real games pass a full list such\n",
    "as words_alpha.txt with --input, or save one as words.txt in the\n",
    "automatic-hangman folder of your data directory.",
);

pub const DEFAULT_TURN_DELAY: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    MachinePlays,
    HumanPlays,
    About,
    Quit,
    Invalid,
}

/// Maps the menu's numbered entries (1-4); anything else is `Invalid`.
#[must_use]
pub fn parse_menu_choice(input: &str) -> MenuChoice {
    match input.trim().parse::<i64>() {
        Ok(1) => MenuChoice::MachinePlays,
        Ok(2) => MenuChoice::HumanPlays,
        Ok(3) => MenuChoice::About,
        Ok(4) => MenuChoice::Quit,
        _ => MenuChoice::Invalid,
    }
}

/// Lowercased solution word, or `None` if the input is empty or not purely
/// alphabetic, in which case a random word is used.
#[must_use]
pub fn normalize_solution(input: &str) -> Option<String> {
    let word = input.trim();
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(word.to_ascii_lowercase())
    } else {
        None
    }
}

/// Single lowercase letter from a line of human input.
#[must_use]
pub fn parse_letter(input: &str) -> Option<char> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    Machine,
    Human,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    /// The round ended without being won or lost, e.g. the user left.
    Abandoned,
}

impl Outcome {
    fn of(state: &GameState) -> Self {
        if state.is_solved() {
            Self::Won
        } else if state.is_lost() {
            Self::Lost
        } else {
            Self::Abandoned
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    Quit,
}

/// Snapshot of a round handed to the front end for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundView {
    /// Only set when the player is allowed to see it.
    pub solution: Option<String>,
    pub revealed: String,
    pub guesses: Vec<char>,
    pub misses: usize,
}

impl RoundView {
    fn of(state: &GameState, show_solution: bool) -> Self {
        Self {
            solution: show_solution.then(|| state.solution().to_string()),
            revealed: state.revealed_pattern(),
            guesses: state.guess_history().to_vec(),
            misses: state.miss_count(),
        }
    }
}

/// Everything a front end must provide to host a session.
pub trait GameInterface {
    fn read_menu_choice(&mut self) -> MenuChoice;
    /// Raw text for the machine's solution; empty means "pick one" and
    /// `None` means the user left.
    fn read_solution(&mut self) -> Option<String>;
    /// `None` means the input was rejected and should be asked for again.
    fn read_letter(&mut self, view: &RoundView) -> Option<UserAction>;
    fn display_round(&mut self, view: &RoundView, player: Player);
    fn display_outcome(&mut self, view: &RoundView, player: Player, outcome: Outcome);
    fn display_about(&mut self, about: &str);
    fn display_invalid_choice(&mut self);
    fn display_message(&mut self, message: &str);
    fn display_exit_message(&mut self);
    /// Waits between machine turns. `Some(UserAction::Quit)` stops the round.
    fn pause(&mut self, delay: Duration) -> Option<UserAction>;
}

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Pause between machine turns so a watcher can follow along.
    pub turn_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            turn_delay: DEFAULT_TURN_DELAY,
        }
    }
}

pub struct Session<'d> {
    dictionary: &'d Dictionary,
    state: GameState<'d>,
    solver: Solver<'d>,
    config: SessionConfig,
}

impl<'d> Session<'d> {
    pub fn new(dictionary: &'d Dictionary, config: SessionConfig) -> Self {
        Self {
            dictionary,
            state: GameState::new(dictionary),
            solver: Solver::new(dictionary),
            config,
        }
    }

    /// Session whose random solutions and tie-breaks follow `seed`.
    pub fn with_seed(dictionary: &'d Dictionary, config: SessionConfig, seed: u64) -> Self {
        Self {
            dictionary,
            state: GameState::with_seed(dictionary, seed),
            solver: Solver::with_seed(dictionary, seed.wrapping_add(1)),
            config,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState<'d> {
        &self.state
    }

    #[must_use]
    pub fn solver(&self) -> &Solver<'d> {
        &self.solver
    }

    /// Runs the menu until the user quits, returning every finished round.
    pub fn run<I: GameInterface>(&mut self, ui: &mut I) -> Vec<(Player, Outcome)> {
        let mut rounds = Vec::new();
        loop {
            match ui.read_menu_choice() {
                MenuChoice::MachinePlays => {
                    rounds.push((Player::Machine, self.play_machine_round(ui)));
                }
                MenuChoice::HumanPlays => {
                    rounds.push((Player::Human, self.play_human_round(ui)));
                }
                MenuChoice::About => ui.display_about(ABOUT),
                MenuChoice::Quit => {
                    ui.display_exit_message();
                    break;
                }
                MenuChoice::Invalid => ui.display_invalid_choice(),
            }
        }
        rounds
    }

    /// The solver plays one round against a word chosen by the user, or a
    /// random one.
    pub fn play_machine_round<I: GameInterface>(&mut self, ui: &mut I) -> Outcome {
        let Some(input) = ui.read_solution() else {
            info_log!("Machine round cancelled at the solution prompt");
            return Outcome::Abandoned;
        };
        match normalize_solution(&input) {
            Some(word) => self.state.set_solution(&word),
            None if self.dictionary.is_empty() => {
                ui.display_message("The dictionary is empty, enter a word for the machine.");
                return Outcome::Abandoned;
            }
            None => self.state.generate_random_solution(),
        }
        info_log!("Machine round started, solution '{}'", self.state.solution());

        while !self.state.is_over() {
            ui.display_round(&RoundView::of(&self.state, true), Player::Machine);

            let Some(letter) = self.solver.guess(&self.state.revealed_pattern()) else {
                debug_log!("Solver ran out of letters");
                break;
            };
            let correct = self.state.submit_guess(letter);
            self.solver
                .receive_feedback(&self.state.revealed_pattern(), correct);

            if ui.pause(self.config.turn_delay) == Some(UserAction::Quit) {
                info_log!("Machine round left by the user");
                break;
            }
        }

        let outcome = Outcome::of(&self.state);
        info_log!(
            "Machine round over: {:?} after {} guesses, {} misses",
            outcome,
            self.solver.guess_count(),
            self.state.miss_count()
        );
        ui.display_outcome(&RoundView::of(&self.state, true), Player::Machine, outcome);
        self.solver.reset();
        outcome
    }

    /// The user guesses a random word one letter at a time.
    pub fn play_human_round<I: GameInterface>(&mut self, ui: &mut I) -> Outcome {
        if self.dictionary.is_empty() {
            ui.display_message("The dictionary is empty, there is nothing to guess.");
            return Outcome::Abandoned;
        }
        self.state.generate_random_solution();
        info_log!("Human round started");

        while !self.state.is_over() {
            let view = RoundView::of(&self.state, false);
            ui.display_round(&view, Player::Human);
            match ui.read_letter(&view) {
                Some(UserAction::Guess(letter)) => {
                    self.state.submit_guess(letter);
                }
                Some(UserAction::Quit) => break,
                None => {}
            }
        }

        let outcome = Outcome::of(&self.state);
        info_log!("Human round over: {:?}", outcome);
        ui.display_outcome(&RoundView::of(&self.state, true), Player::Human, outcome);
        outcome
    }
}
