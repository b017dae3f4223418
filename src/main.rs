use automatic_hangman::cli::{CliInterface, parse_cli};
use automatic_hangman::info_log;
use automatic_hangman::logging::init_logging;
use automatic_hangman::session::{Session, SessionConfig};
use automatic_hangman::tui::TuiInterface;
use automatic_hangman::wordbank::{DictionarySource, resolve_dictionary};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();
    let cli = parse_cli();

    let (dictionary, source) = match resolve_dictionary(cli.dictionary_path.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load word list: {e}");
            return ExitCode::FAILURE;
        }
    };
    match &source {
        DictionarySource::File(path) | DictionarySource::User(path) => {
            info_log!("Loaded {} words from {}", dictionary.len(), path.display());
        }
        DictionarySource::Embedded => {
            info_log!("Loaded {} embedded words", dictionary.len());
        }
    }

    let config = SessionConfig {
        turn_delay: cli.turn_delay(),
    };
    let mut session = match cli.seed {
        Some(seed) => Session::with_seed(&dictionary, config, seed),
        None => Session::new(&dictionary, config),
    };

    if cli.plain {
        println!("Welcome to automatic-hangman! Loaded {} words.", dictionary.len());
        let mut interface = CliInterface::new(io::stdin().lock());
        session.run(&mut interface);
        return ExitCode::SUCCESS;
    }

    match TuiInterface::new() {
        Ok(mut interface) => {
            session.run(&mut interface);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to start the terminal interface: {e}");
            eprintln!("Try --plain for the line-based interface.");
            ExitCode::FAILURE
        }
    }
}
