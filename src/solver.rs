use crate::debug_log;
use crate::game_state::PLACEHOLDER;
use crate::wordbank::Dictionary;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

pub const ALPHABET_LEN: usize = 26;

fn letter_index(letter: char) -> Option<usize> {
    letter
        .is_ascii_lowercase()
        .then(|| (letter as u8 - b'a') as usize)
}

fn index_letter(index: usize) -> char {
    (b'a' + index as u8) as char
}

/// Automated player: keeps every dictionary word that still fits the
/// feedback and guesses the letter found in the most of them.
///
/// It only ever sees the revealed pattern and whether its last guess was
/// right, never the solution.
#[derive(Debug)]
pub struct Solver<'d> {
    dictionary: &'d Dictionary,
    rng: StdRng,
    candidates: Vec<&'d str>,
    guesses: Vec<char>,
    guess_count: usize,
    scores: [f64; ALPHABET_LEN],
}

impl<'d> Solver<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self::with_rng(dictionary, StdRng::from_os_rng())
    }

    /// Solver whose tie-breaks are reproducible for a given seed.
    pub fn with_seed(dictionary: &'d Dictionary, seed: u64) -> Self {
        Self::with_rng(dictionary, StdRng::seed_from_u64(seed))
    }

    fn with_rng(dictionary: &'d Dictionary, rng: StdRng) -> Self {
        Self {
            dictionary,
            rng,
            candidates: Vec::new(),
            guesses: Vec::new(),
            guess_count: 0,
            scores: [0.0; ALPHABET_LEN],
        }
    }

    /// Picks the next letter to guess for the given revealed pattern.
    ///
    /// The first call of a round seeds the candidate pool with every word
    /// of the pattern's length. Letters tied for the best score are picked
    /// between uniformly at random. If the pool is empty every unguessed
    /// letter ties at zero. Returns `None` only once all 26 letters have
    /// been guessed this round.
    pub fn guess(&mut self, revealed: &str) -> Option<char> {
        if self.guess_count == 0 {
            let len = revealed.chars().count();
            self.candidates = self.dictionary.words_of_length(len).collect();
            debug_log!(
                "Seeded candidate pool with {} words of length {}",
                self.candidates.len(),
                len
            );
        }

        self.update_scores();

        let best = self
            .unguessed()
            .map(|i| self.scores[i])
            .fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<usize> = self
            .unguessed()
            .filter(|&i| self.scores[i] == best)
            .collect();
        let letter = index_letter(*tied.choose(&mut self.rng)?);

        debug_log!(
            "Guessing '{}' (score {:.4}, {} tied, {} candidates)",
            letter,
            best,
            tied.len(),
            self.candidates.len()
        );

        self.guesses.push(letter);
        self.guess_count += 1;
        Some(letter)
    }

    fn unguessed(&self) -> impl Iterator<Item = usize> + '_ {
        (0..ALPHABET_LEN).filter(|&i| !self.guesses.contains(&index_letter(i)))
    }

    /// Recomputes each unguessed letter's share of the candidate words that
    /// contain it. Guessed letters score zero, as does everything when the
    /// pool is empty.
    fn update_scores(&mut self) {
        let mut counts = [0usize; ALPHABET_LEN];
        for i in self.unguessed() {
            let letter = index_letter(i);
            counts[i] = self
                .candidates
                .iter()
                .filter(|word| word.contains(letter))
                .count();
        }

        let total: usize = counts.iter().sum();
        for (score, &count) in self.scores.iter_mut().zip(counts.iter()) {
            *score = if total > 0 {
                count as f64 / total as f64
            } else {
                0.0
            };
        }
    }

    /// Narrows the pool using the outcome of the most recent guess.
    ///
    /// Two passes, in order: keep words that contain (or lack) the last
    /// guessed letter, then keep words agreeing with every revealed position.
    pub fn receive_feedback(&mut self, revealed: &str, was_correct: bool) {
        let Some(&letter) = self.guesses.last() else {
            debug_log!("Feedback before any guess, ignoring");
            return;
        };
        let before = self.candidates.len();

        self.candidates
            .retain(|word| word.contains(letter) == was_correct);
        self.candidates
            .retain(|word| matches_revealed(word, revealed));

        debug_log!(
            "Feedback for '{}' (correct: {}): {} -> {} candidates",
            letter,
            was_correct,
            before,
            self.candidates.len()
        );
    }

    /// Forgets everything about the current round.
    pub fn reset(&mut self) {
        self.candidates.clear();
        self.guesses.clear();
        self.guess_count = 0;
        self.scores = [0.0; ALPHABET_LEN];
    }

    #[must_use]
    pub fn candidates(&self) -> &[&'d str] {
        &self.candidates
    }

    #[must_use]
    pub fn guess_history(&self) -> &[char] {
        &self.guesses
    }

    #[must_use]
    pub fn guess_count(&self) -> usize {
        self.guess_count
    }

    #[must_use]
    pub fn letter_scores(&self) -> &[f64; ALPHABET_LEN] {
        &self.scores
    }

    /// Score of a single letter from the last call to [`Solver::guess`].
    #[must_use]
    pub fn letter_score(&self, letter: char) -> f64 {
        letter_index(letter).map_or(0.0, |i| self.scores[i])
    }
}

/// True when `word` has the same length as `revealed` and agrees with it at
/// every non-placeholder position.
pub fn matches_revealed(word: &str, revealed: &str) -> bool {
    word.chars().count() == revealed.chars().count()
        && word
            .chars()
            .zip(revealed.chars())
            .all(|(w, r)| r == PLACEHOLDER || w == r)
}
