// Library interface for automatic-hangman
// The binary is a thin shell over these modules; tests use them directly.

pub mod art;
pub mod cli;
pub mod game_state;
pub mod logging;
pub mod session;
pub mod solver;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use game_state::{GameState, MAX_MISSES, PLACEHOLDER};
pub use session::{GameInterface, MenuChoice, Outcome, Player, Session, SessionConfig};
pub use solver::{Solver, matches_revealed};
pub use wordbank::{Dictionary, load_dictionary_from_file, load_dictionary_from_str};
