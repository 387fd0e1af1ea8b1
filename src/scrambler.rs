use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// How many shuffles to try before falling back to a rotation
pub const MAX_ATTEMPTS: usize = 10;

/// Shuffle the letters of `word`.
///
/// The result is a permutation of the input and differs from it whenever the
/// word holds at least two different characters. Words made of a single
/// repeated character come back unchanged.
pub fn scramble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let original: Vec<char> = word.chars().collect();
    if original.len() < 2 || original.iter().all(|c| *c == original[0]) {
        return word.to_string();
    }

    let mut letters = original.clone();
    for _ in 0..MAX_ATTEMPTS {
        letters.shuffle(rng);
        if letters != original {
            return letters.into_iter().collect();
        }
    }

    // a left rotation only maps a string onto itself when every char is equal
    let mut rotated = original;
    rotated.rotate_left(1);
    rotated.into_iter().collect()
}

/// Scrambler owning its random source
#[derive(Debug)]
pub struct Scrambler {
    rng: StdRng,
}

impl Scrambler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn scramble(&mut self, word: &str) -> String {
        scramble(word, &mut self.rng)
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
