use rand::seq::SliceRandom;

use crate::scrambler::Scrambler;
use crate::words::Difficulty;

/// Mutable state of one play-through
#[derive(Debug, Clone)]
pub struct Session {
    pub difficulty: Difficulty,
    pub words: Vec<String>,
    pub word_index: usize,
    pub current_word: String,
    pub scrambled_word: String,
    pub input: String,
}

impl Session {
    /// Returns `None` for an empty pool
    pub fn new(
        difficulty: Difficulty,
        pool: &[String],
        shuffle: bool,
        scrambler: &mut Scrambler,
    ) -> Option<Self> {
        let mut words = pool.to_vec();
        if shuffle {
            words.shuffle(scrambler.rng());
        }
        let current_word = words.first()?.clone();
        let scrambled_word = scrambler.scramble(&current_word);

        Some(Self {
            difficulty,
            words,
            word_index: 0,
            current_word,
            scrambled_word,
            input: String::new(),
        })
    }

    pub fn total(&self) -> usize {
        self.words.len()
    }

    pub fn is_match(&self, guess: &str) -> bool {
        !guess.is_empty() && guess.to_lowercase() == self.current_word.to_lowercase()
    }

    /// Move to the next word. Returns false once the pool is exhausted.
    pub fn advance(&mut self, scrambler: &mut Scrambler) -> bool {
        self.word_index += 1;
        self.input.clear();
        match self.words.get(self.word_index) {
            Some(word) => {
                self.current_word = word.clone();
                self.scrambled_word = scrambler.scramble(word);
                true
            }
            None => false,
        }
    }

    pub fn push_char(&mut self, c: char, max_len: usize) {
        if c.is_alphabetic() && self.input.chars().count() < max_len {
            self.input.extend(c.to_lowercase());
        }
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<String> {
        ["python", "coding", "module"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_session_starts_at_first_word() {
        let mut scrambler = Scrambler::new(Some(5));
        let session = Session::new(Difficulty::Easy, &pool(), false, &mut scrambler).unwrap();

        assert_eq!(session.word_index, 0);
        assert_eq!(session.current_word, "python");
        assert_ne!(session.scrambled_word, "python");
        assert!(session.input.is_empty());
        assert_eq!(session.total(), 3);
    }

    #[test]
    fn shuffled_session_keeps_all_words() {
        let mut scrambler = Scrambler::new(Some(5));
        let session = Session::new(Difficulty::Easy, &pool(), true, &mut scrambler).unwrap();

        let mut words = session.words.clone();
        words.sort();
        let mut expected = pool();
        expected.sort();
        assert_eq!(words, expected);
        assert_eq!(session.current_word, session.words[0]);
    }

    #[test]
    fn empty_pool_yields_no_session() {
        let mut scrambler = Scrambler::new(Some(5));
        assert!(Session::new(Difficulty::Hard, &[], false, &mut scrambler).is_none());
    }

    #[test]
    fn advance_walks_the_pool_then_reports_exhaustion() {
        let mut scrambler = Scrambler::new(Some(5));
        let mut session = Session::new(Difficulty::Easy, &pool(), false, &mut scrambler).unwrap();

        assert!(session.advance(&mut scrambler));
        assert_eq!(session.word_index, 1);
        assert_eq!(session.current_word, "coding");
        assert!(session.advance(&mut scrambler));
        assert_eq!(session.current_word, "module");
        assert!(!session.advance(&mut scrambler));
        assert_eq!(session.word_index, 3);
    }

    #[test]
    fn matching_is_case_insensitive_and_rejects_empty() {
        let mut scrambler = Scrambler::new(Some(5));
        let session = Session::new(Difficulty::Easy, &pool(), false, &mut scrambler).unwrap();

        assert!(session.is_match("python"));
        assert!(session.is_match("PyThOn"));
        assert!(!session.is_match("pytho"));
        assert!(!session.is_match(""));
    }

    #[test]
    fn input_accepts_letters_only_and_is_bounded() {
        let mut scrambler = Scrambler::new(Some(5));
        let mut session = Session::new(Difficulty::Easy, &pool(), false, &mut scrambler).unwrap();

        for c in "Py7 th-on".chars() {
            session.push_char(c, 5);
        }
        assert_eq!(session.input, "pytho");

        session.pop_char();
        assert_eq!(session.input, "pyth");
        assert_eq!(session.take_input(), "pyth");
        assert!(session.input.is_empty());

        session.pop_char();
        assert!(session.input.is_empty());
    }
}
