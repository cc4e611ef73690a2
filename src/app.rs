use rand::{rngs::StdRng, SeedableRng};

use crate::language::{Difficulty, Language, WordListError, WordSampler};
use crate::session::{Keystroke, Session, Transition};
use crate::stats::Statistics;

pub const DEFAULT_NUMBER_OF_WORDS: usize = 25;

/// Parameters a session (and every restart of it) is generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub number_of_words: usize,
    pub difficulty: Difficulty,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            number_of_words: DEFAULT_NUMBER_OF_WORDS,
            difficulty: Difficulty::default(),
        }
    }
}

/// What the host loop should do after the app handled a keystroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppAction {
    Redraw,
    Finished(Statistics),
}

/// Owns the running session and everything needed to replace it
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub restarts: usize,
    sampler: WordSampler,
    rng: StdRng,
}

impl App {
    pub fn new(language: &Language, settings: SessionSettings) -> Result<Self, WordListError> {
        Self::with_rng(language, settings, StdRng::from_entropy())
    }

    /// Deterministic passages, for tests and reproducible runs.
    pub fn with_seed(
        language: &Language,
        settings: SessionSettings,
        seed: u64,
    ) -> Result<Self, WordListError> {
        Self::with_rng(language, settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        language: &Language,
        settings: SessionSettings,
        mut rng: StdRng,
    ) -> Result<Self, WordListError> {
        let sampler = WordSampler::new(language, settings.difficulty, settings.number_of_words)?;
        let session = Session::new(sampler.sample(&mut rng));

        tracing::info!(
            words = settings.number_of_words,
            difficulty = %settings.difficulty,
            "starting session"
        );

        Ok(Self {
            session,
            restarts: 0,
            sampler,
            rng,
        })
    }

    /// Throw the current attempt away and start over on a fresh passage.
    pub fn reset(&mut self) {
        self.session = Session::new(self.sampler.sample(&mut self.rng));
        self.restarts += 1;
        tracing::info!(restarts = self.restarts, "restarted session");
    }

    pub fn on_keystroke(&mut self, keystroke: Keystroke) -> AppAction {
        match self.session.handle(keystroke) {
            Transition::Continue => AppAction::Redraw,
            Transition::Restart => {
                self.reset();
                AppAction::Redraw
            }
            Transition::Finished => AppAction::Finished(self.statistics()),
        }
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::from_session(&self.session)
    }
}
