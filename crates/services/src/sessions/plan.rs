use rand::seq::SliceRandom;
use rand::{Rng, rng};

use quiz_core::model::Question;

/// Picks the questions of a quiz from the bank.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizBuilder {
    shuffle: bool,
}

impl QuizBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable shuffling the bank before selection.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Select `count` questions using the thread-local RNG.
    #[must_use]
    pub fn build(self, bank: &[Question], count: usize) -> Vec<Question> {
        self.build_with_rng(bank, count, &mut rng())
    }

    /// Select `count` questions from `bank`.
    ///
    /// - Without shuffling, the first `count` questions in bank order are taken.
    /// - With shuffling, a uniformly shuffled copy of the bank is truncated.
    /// - `count` is capped at the bank size.
    pub fn build_with_rng<R: Rng + ?Sized>(
        self,
        bank: &[Question],
        count: usize,
        rng: &mut R,
    ) -> Vec<Question> {
        let mut selected = bank.to_vec();
        if self.shuffle {
            selected.as_mut_slice().shuffle(rng);
        }
        selected.truncate(count);
        selected
    }
}
