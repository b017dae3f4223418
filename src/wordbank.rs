use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_DICTIONARY: &str = include_str!("resources/words.txt");

const USER_DICTIONARY_DIR: &str = "automatic-hangman";
const USER_DICTIONARY_FILE: &str = "words.txt";

/// Immutable, ordered list of lowercase alphabetic words.
///
/// Loaded once at startup and shared by reference with every `GameState`
/// and `Solver` that plays against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Builds a dictionary, lowercasing each entry and dropping anything
    /// that is empty or not purely ASCII alphabetic.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|word| normalize_word(word.as_ref()))
            .collect();
        Self { words }
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words_of_length(&self, len: usize) -> impl Iterator<Item = &str> {
        self.words
            .iter()
            .filter(move |word| word.len() == len)
            .map(String::as_str)
    }

    /// Picks a word uniformly at random, or `None` for an empty dictionary.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.words.choose(rng).map(String::as_str)
    }
}

fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(word)
    } else {
        None
    }
}

pub fn load_dictionary_from_str(data: &str) -> Dictionary {
    Dictionary::from_words(data.lines())
}

pub fn load_dictionary_from_file<P: AsRef<Path>>(path: P) -> io::Result<Dictionary> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_word(&line?) {
            words.push(word);
        }
    }
    Ok(Dictionary { words })
}

/// Where a loaded dictionary came from, for the startup message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    File(PathBuf),
    User(PathBuf),
    Embedded,
}

/// Location of the optional per-user word list, e.g.
/// `~/.local/share/automatic-hangman/words.txt` on Linux.
#[must_use]
pub fn user_dictionary_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(USER_DICTIONARY_DIR).join(USER_DICTIONARY_FILE))
}

/// Loads the dictionary from an explicit path if given, otherwise from the
/// per-user word list if one exists, otherwise from the embedded list.
pub fn resolve_dictionary(explicit: Option<&Path>) -> io::Result<(Dictionary, DictionarySource)> {
    if let Some(path) = explicit {
        let dictionary = load_dictionary_from_file(path)?;
        return Ok((dictionary, DictionarySource::File(path.to_path_buf())));
    }

    if let Some(path) = user_dictionary_path()
        && path.is_file()
    {
        let dictionary = load_dictionary_from_file(&path)?;
        return Ok((dictionary, DictionarySource::User(path)));
    }

    Ok((
        load_dictionary_from_str(EMBEDDED_DICTIONARY),
        DictionarySource::Embedded,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Write;

    #[test]
    fn test_load_from_str_lowercases_and_filters() {
        let dictionary = load_dictionary_from_str("Cat\n  dog \n\nx-ray\ncar\nb4\n");
        assert_eq!(dictionary.words(), &["cat", "dog", "car"]);
    }

    #[test]
    fn test_load_from_str_preserves_order() {
        let dictionary = load_dictionary_from_str("zebra\napple\nmango");
        assert_eq!(dictionary.words(), &["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_embedded_dictionary_is_clean() {
        let dictionary = load_dictionary_from_str(EMBEDDED_DICTIONARY);
        assert!(!dictionary.is_empty());
        assert!(
            dictionary
                .words()
                .iter()
                .all(|w| w.chars().all(|c| c.is_ascii_lowercase()))
        );
    }

    #[test]
    fn test_words_of_length() {
        let dictionary = Dictionary::from_words(["cat", "dog", "bird", "car"]);
        let three: Vec<&str> = dictionary.words_of_length(3).collect();
        assert_eq!(three, vec!["cat", "dog", "car"]);
        assert_eq!(dictionary.words_of_length(7).count(), 0);
    }

    #[test]
    fn test_choose_from_empty_dictionary() {
        let dictionary = Dictionary::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(dictionary.choose(&mut rng), None);
    }

    #[test]
    fn test_choose_returns_member() {
        let dictionary = Dictionary::from_words(["cat", "dog", "car"]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let word = dictionary.choose(&mut rng).unwrap();
            assert!(dictionary.words().iter().any(|w| w == word));
        }
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("automatic_hangman_wordbank_test.txt");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "Apple").unwrap();
            writeln!(file, "grape").unwrap();
            writeln!(file, "not a word").unwrap();
        }

        let dictionary = load_dictionary_from_file(&path).unwrap();
        assert_eq!(dictionary.words(), &["apple", "grape"]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let path = std::env::temp_dir().join("automatic_hangman_does_not_exist.txt");
        assert!(load_dictionary_from_file(&path).is_err());
    }

    #[test]
    fn test_resolve_explicit_missing_file_errors() {
        let path = std::env::temp_dir().join("automatic_hangman_missing_input.txt");
        assert!(resolve_dictionary(Some(&path)).is_err());
    }
}
