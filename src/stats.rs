use std::fmt;
use std::time::Duration;

use crate::session::Session;
use crate::util::{ratio, round_to};

const BANNER_WIDTH: usize = 40;

/// Results of a finished attempt, derived from the session counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub wpm: f64,
    pub accuracy: f64,
    pub duration_secs: f64,
    pub words_typed: usize,
    pub correct_chars: usize,
    pub total_chars: usize,
}

impl Statistics {
    /// A session that never started or never ended reports a zero duration.
    pub fn from_session(session: &Session) -> Self {
        let duration = match (session.started_at, session.ended_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            _ => Duration::ZERO,
        };

        Self::compute(
            session.current_word,
            session.correct_chars,
            session.total_chars,
            duration,
        )
    }

    pub fn compute(
        words_typed: usize,
        correct_chars: usize,
        total_chars: usize,
        duration: Duration,
    ) -> Self {
        let duration_secs = round_to(duration.as_secs_f64(), 2);

        let wpm = ratio(words_typed as f64, duration_secs / 60.0)
            .map(|wpm| round_to(wpm, 2))
            .unwrap_or(0.0);

        let accuracy = ratio(correct_chars as f64, total_chars as f64)
            .map(|acc| round_to(acc * 100.0, 2))
            .unwrap_or(0.0);

        Self {
            wpm,
            accuracy,
            duration_secs,
            words_typed,
            correct_chars,
            total_chars,
        }
    }

    /// Human readable report printed once the terminal is restored.
    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(BANNER_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "{:^width$}", "Typing Test Results", width = BANNER_WIDTH)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "WPM: {:.2}", self.wpm)?;
        writeln!(f, "Time (seconds): {:.2}", self.duration_secs)?;
        writeln!(f, "Words typed: {}", self.words_typed)?;
        writeln!(f, "Accuracy (%): {:.2}", self.accuracy)?;
        write!(
            f,
            "Correct characters/Total characters: {}/{}",
            self.correct_chars, self.total_chars
        )
    }
}
