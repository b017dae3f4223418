use crate::debug_log;
use crate::wordbank::Dictionary;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Character shown for positions of the solution that are still hidden.
pub const PLACEHOLDER: char = '_';

/// Miss count at which a round is lost, the last gallows stage.
pub const MAX_MISSES: usize = 6;

/// Ground truth for a single round: the hidden word and what the player has
/// uncovered of it so far.
#[derive(Debug)]
pub struct GameState<'d> {
    dictionary: &'d Dictionary,
    rng: StdRng,
    solution: String,
    revealed: Vec<char>,
    guesses: Vec<char>,
    misses: usize,
}

impl<'d> GameState<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self::with_rng(dictionary, StdRng::from_os_rng())
    }

    /// Same as [`GameState::new`] but with a reproducible random source.
    pub fn with_seed(dictionary: &'d Dictionary, seed: u64) -> Self {
        Self::with_rng(dictionary, StdRng::seed_from_u64(seed))
    }

    fn with_rng(dictionary: &'d Dictionary, rng: StdRng) -> Self {
        Self {
            dictionary,
            rng,
            solution: String::new(),
            revealed: Vec::new(),
            guesses: Vec::new(),
            misses: 0,
        }
    }

    /// Starts a new round with `solution` as the hidden word.
    pub fn set_solution(&mut self, solution: &str) {
        self.solution = solution.to_string();
        self.start_round();
    }

    /// Starts a new round with a word drawn uniformly from the dictionary.
    ///
    /// An empty dictionary yields an empty solution, which counts as solved
    /// immediately.
    pub fn generate_random_solution(&mut self) {
        self.solution = match self.dictionary.choose(&mut self.rng) {
            Some(word) => word.to_string(),
            None => {
                log::warn!("Dictionary is empty, starting round with an empty solution");
                String::new()
            }
        };
        self.start_round();
    }

    fn start_round(&mut self) {
        self.revealed = vec![PLACEHOLDER; self.solution.chars().count()];
        self.guesses.clear();
        self.misses = 0;
        debug_log!("New round, solution length {}", self.revealed.len());
    }

    /// Applies one guess and returns whether it uncovered anything.
    ///
    /// A letter that was already guessed is always a miss, even when it is
    /// in the solution, and is not recorded a second time.
    pub fn submit_guess(&mut self, letter: char) -> bool {
        let is_correct = self.solution.contains(letter);
        let is_repeat = self.guesses.contains(&letter);

        if !is_repeat {
            self.guesses.push(letter);
        }

        if is_correct && !is_repeat {
            for (slot, c) in self.revealed.iter_mut().zip(self.solution.chars()) {
                if c == letter {
                    *slot = letter;
                }
            }
            true
        } else {
            self.misses += 1;
            debug_log!(
                "Miss on '{}' (repeat: {}), misses now {}",
                letter,
                is_repeat,
                self.misses
            );
            false
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.revealed.contains(&PLACEHOLDER)
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.misses >= MAX_MISSES
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.is_solved() || self.is_lost()
    }

    #[must_use]
    pub fn solution(&self) -> &str {
        &self.solution
    }

    #[must_use]
    pub fn revealed_pattern(&self) -> String {
        self.revealed.iter().collect()
    }

    #[must_use]
    pub fn guess_history(&self) -> &[char] {
        &self.guesses
    }

    #[must_use]
    pub fn miss_count(&self) -> usize {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Dictionary {
        Dictionary::from_words(["cat", "dog", "car", "bb", "xyz"])
    }

    #[test]
    fn test_set_solution_hides_every_position() {
        let dictionary = dictionary();
        let mut state = GameState::with_seed(&dictionary, 1);
        state.set_solution("hangman");
        assert_eq!(state.revealed_pattern(), "_______");
        assert_eq!(state.miss_count(), 0);
        assert!(state.guess_history().is_empty());
        assert!(!state.is_solved());
    }

    #[test]
    fn test_correct_guesses_solve_without_misses() {
        let dictionary = dictionary();
        let mut state = GameState::with_seed(&dictionary, 1);
        state.set_solution("cat");

        assert!(state.submit_guess('a'));
        assert_eq!(state.revealed_pattern(), "_a_");
        assert!(state.submit_guess('t'));
        assert_eq!(state.revealed_pattern(), "_at");
        assert!(state.submit_guess('c'));

        assert!(state.is_solved());
        assert_eq!(state.miss_count(), 0);
        assert_eq!(state.guess_history(), &['a', 't', 'c']);
    }

    #[test]
    fn test_repeated_letter_revealed_everywhere() {
        let dictionary = dictionary();
        let mut state = GameState::with_seed(&dictionary, 1);
        state.set_solution("bb");

        assert!(state.submit_guess('b'));
        assert_eq!(state.revealed_pattern(), "bb");
        assert!(state.is_solved());
    }

    #[test]
    fn test_wrong_guess_is_a_miss() {
        let dictionary = dictionary();
        let mut state = GameState::with_seed(&dictionary, 1);
        state.set_solution("cat");

        assert!(!state.submit_guess('z'));
        assert_eq!(state.miss_count(), 1);
        assert_eq!(state.revealed_pattern(), "___");
        assert_eq!(state.guess_history(), &['z']);
    }

    #[test]
    fn test_repeated_correct_guess_is_a_miss() {
        let dictionary = dictionary();
        let mut state = GameState::with_seed(&dictionary, 1);
        state.set_solution("cat");

        assert!(state.submit_guess('a'));
        let before = state.revealed_pattern();
        assert!(!state.submit_guess('a'));

        assert_eq!(state.miss_count(), 1);
        assert_eq!(state.revealed_pattern(), before);
        assert_eq!(state.guess_history(), &['a']);
    }

    #[test]
    fn test_repeated_wrong_guess_is_another_miss() {
        let dictionary = dictionary();
        let mut state = GameState::with_seed(&dictionary, 1);
        state.set_solution("cat");

        assert!(!state.submit_guess('q'));
        assert!(!state.submit_guess('q'));
        assert_eq!(state.miss_count(), 2);
        assert_eq!(state.guess_history(), &['q']);
        assert_eq!(state.revealed_pattern(), "___");
    }

    #[test]
    fn test_sixth_miss_loses() {
        let dictionary = dictionary();
        let mut state = GameState::with_seed(&dictionary, 1);
        state.set_solution("xyz");

        for letter in ['a', 'b', 'c', 'd', 'e'] {
            assert!(!state.submit_guess(letter));
        }
        assert_eq!(state.miss_count(), 5);
        assert!(!state.is_over());

        assert!(!state.submit_guess('f'));
        assert_eq!(state.miss_count(), 6);
        assert!(!state.is_solved());
        assert!(state.is_lost());
        assert!(state.is_over());
    }

    #[test]
    fn test_pattern_length_matches_solution_after_every_guess() {
        let dictionary = dictionary();
        let mut state = GameState::with_seed(&dictionary, 1);
        state.set_solution("banana");

        for letter in ['a', 'x', 'a', 'n', 'b', 'q'] {
            state.submit_guess(letter);
            assert_eq!(state.revealed_pattern().len(), state.solution().len());
        }
        assert_eq!(state.revealed_pattern(), "banana");
    }

    #[test]
    fn test_revealed_positions_match_solution() {
        let dictionary = dictionary();
        let mut state = GameState::with_seed(&dictionary, 1);
        state.set_solution("letter");

        state.submit_guess('t');
        state.submit_guess('e');
        for (shown, actual) in state.revealed_pattern().chars().zip(state.solution().chars()) {
            assert!(shown == PLACEHOLDER || shown == actual);
        }
        assert_eq!(state.revealed_pattern(), "_ette_");
    }

    #[test]
    fn test_new_round_clears_previous_round() {
        let dictionary = dictionary();
        let mut state = GameState::with_seed(&dictionary, 1);
        state.set_solution("cat");
        state.submit_guess('z');
        state.submit_guess('a');

        state.generate_random_solution();
        assert!(state.guess_history().is_empty());
        assert_eq!(state.miss_count(), 0);
        assert!(
            state
                .revealed_pattern()
                .chars()
                .all(|c| c == PLACEHOLDER)
        );
        assert!(dictionary.words().iter().any(|w| w == state.solution()));
    }

    #[test]
    fn test_random_solution_from_empty_dictionary() {
        let dictionary = Dictionary::default();
        let mut state = GameState::with_seed(&dictionary, 1);
        state.generate_random_solution();

        assert_eq!(state.solution(), "");
        assert_eq!(state.revealed_pattern(), "");
        assert!(state.is_solved());
    }

    #[test]
    fn test_same_seed_same_solution() {
        let dictionary = load_words();
        let mut first = GameState::with_seed(&dictionary, 42);
        let mut second = GameState::with_seed(&dictionary, 42);
        first.generate_random_solution();
        second.generate_random_solution();
        assert_eq!(first.solution(), second.solution());
    }

    fn load_words() -> Dictionary {
        crate::wordbank::load_dictionary_from_str(crate::wordbank::EMBEDDED_DICTIONARY)
    }
}
