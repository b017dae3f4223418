use crate::art::{StageColor, body, stage_color};
use crate::session::{
    GameInterface, MenuChoice, Outcome, Player, RoundView, UserAction, parse_letter,
    parse_menu_choice,
};
use clap::Parser;
use colored::{ColoredString, Colorize};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

/// Hangman that plays itself
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list such as words_alpha.txt.
    /// Without it, words.txt in the automatic-hangman folder of the user
    /// data directory is used if present, else a small built-in list.
    #[arg(short = 'i', long = "input")]
    pub dictionary_path: Option<PathBuf>,

    /// Use the plain line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Pause between the machine's guesses, in milliseconds
    #[arg(long = "delay-ms", default_value_t = 2000)]
    pub delay_ms: u64,

    /// Seed for reproducible solutions and tie-breaks
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    #[must_use]
    pub fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

const MENU: &str = "Choose one of the following options.

    1. Let the machine play
    2. Play hangman yourself
    3. Learn about this program
    4. Quit
";

fn paint(text: &str, color: StageColor) -> ColoredString {
    match color {
        StageColor::Green => text.green(),
        StageColor::Blue => text.blue(),
        StageColor::Cyan => text.cyan(),
        StageColor::White => text.white(),
        StageColor::Yellow => text.yellow(),
        StageColor::Red => text.red(),
    }
}

fn format_guesses(guesses: &[char]) -> String {
    guesses
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn wipe_screen() {
    let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}

fn display_round(view: &RoundView) {
    if let Some(solution) = &view.solution {
        println!("Solution: {solution}");
    }
    println!("{}", paint(body(view.misses), stage_color(view.misses)));
    println!();
    println!("{}", view.revealed);
    println!("Guesses: [{}]", format_guesses(&view.guesses));
    println!("Incorrect guesses: {}", view.misses);
}

fn outcome_banner(player: Player, outcome: Outcome) -> ColoredString {
    match (player, outcome) {
        (Player::Machine, Outcome::Won) => "Machine wins!".green().bold(),
        (Player::Machine, Outcome::Lost) => "Machine loses!".red().bold(),
        (Player::Human, Outcome::Won) => "You win!".green().bold(),
        (Player::Human, Outcome::Lost) => "You lose!".red().bold(),
        (_, Outcome::Abandoned) => "Round abandoned.".yellow(),
    }
}

/// Line-based front end reading from any `BufRead`.
///
/// End of input, or a read error, is treated as the user leaving.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(input),
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_menu_choice(&mut self) -> MenuChoice {
        println!("{MENU}");
        println!("Enter number: ");
        match self.read_line() {
            Some(input) => parse_menu_choice(&input),
            None => MenuChoice::Quit,
        }
    }

    fn read_solution(&mut self) -> Option<String> {
        wipe_screen();
        println!("Type a word for the machine to solve or leave it empty for a random word: ");
        self.read_line()
    }

    fn read_letter(&mut self, _view: &RoundView) -> Option<UserAction> {
        println!("Enter your next guess: ");
        let Some(input) = self.read_line() else {
            return Some(UserAction::Quit);
        };
        match parse_letter(&input) {
            Some(letter) => Some(UserAction::Guess(letter)),
            None => {
                println!("{}", "Please enter a single letter.".red());
                None
            }
        }
    }

    fn display_round(&mut self, view: &RoundView, player: Player) {
        wipe_screen();
        if player == Player::Human && view.guesses.is_empty() && view.misses == 0 {
            println!("Alright, time to test your ability at hangman!");
        }
        display_round(view);
    }

    fn display_outcome(&mut self, view: &RoundView, player: Player, outcome: Outcome) {
        wipe_screen();
        display_round(view);
        println!("\n{}\n", outcome_banner(player, outcome));
    }

    fn display_about(&mut self, about: &str) {
        wipe_screen();
        println!("{about}\n");
    }

    fn display_invalid_choice(&mut self) {
        wipe_screen();
        println!("Invalid choice, try again.");
    }

    fn display_message(&mut self, message: &str) {
        println!("{message}");
    }

    fn display_exit_message(&mut self) {
        println!("Goodbye.");
    }

    fn pause(&mut self, delay: Duration) -> Option<UserAction> {
        std::thread::sleep(delay);
        None
    }
}
