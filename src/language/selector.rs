use super::{
    core::{Language, WordListError},
    difficulty::Difficulty,
};
use crate::session::WordList;
use rand::seq::SliceRandom;
use rand::Rng;

/// Draws passages from the part of a language that matches a difficulty.
///
/// The candidate pool is filtered once, so every later draw (including the
/// ones made on restart) is infallible.
#[derive(Debug, Clone)]
pub struct WordSampler {
    candidates: Vec<String>,
    number_of_words: usize,
}

impl WordSampler {
    pub fn new(
        language: &Language,
        difficulty: Difficulty,
        number_of_words: usize,
    ) -> Result<Self, WordListError> {
        let candidates: Vec<String> = language
            .candidates(difficulty)
            .into_iter()
            .map(str::to_owned)
            .collect();

        if candidates.is_empty() {
            return Err(WordListError::NoCandidates {
                name: language.name.clone(),
                difficulty,
            });
        }

        tracing::debug!(
            language = %language.name,
            %difficulty,
            candidates = candidates.len(),
            "built word sampler"
        );

        Ok(Self {
            candidates,
            number_of_words,
        })
    }

    /// Words are drawn with replacement so small pools still fill the passage.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> WordList {
        let words = (0..self.number_of_words)
            .filter_map(|_| self.candidates.choose(rng).cloned())
            .collect();

        WordList::new(words)
    }
}
