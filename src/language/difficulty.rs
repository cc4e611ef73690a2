use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Word length bands used to filter the candidate pool
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Masochist,
}

/// Accepted word lengths for a difficulty, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBand {
    Shorter(usize),
    Longer(usize),
}

impl LengthBand {
    pub fn contains(self, len: usize) -> bool {
        match self {
            LengthBand::Shorter(limit) => len < limit,
            LengthBand::Longer(limit) => len > limit,
        }
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Masochist,
    ];

    pub fn band(self) -> LengthBand {
        match self {
            Difficulty::Easy => LengthBand::Shorter(5),
            Difficulty::Normal => LengthBand::Shorter(7),
            Difficulty::Hard => LengthBand::Shorter(10),
            Difficulty::Masochist => LengthBand::Longer(11),
        }
    }

    pub fn accepts(self, word: &str) -> bool {
        self.band().contains(word.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Difficulty::default(), Difficulty::Normal);
    }

    #[test]
    fn test_length_thresholds() {
        assert!(Difficulty::Easy.accepts("cats"));
        assert!(!Difficulty::Easy.accepts("horse"));

        assert!(Difficulty::Normal.accepts("window"));
        assert!(!Difficulty::Normal.accepts("windows"));

        assert!(Difficulty::Hard.accepts("keyboards"));
        assert!(!Difficulty::Hard.accepts("typewriter"));

        assert!(!Difficulty::Masochist.accepts("programming"));
        assert!(Difficulty::Masochist.accepts("accomplished"));
    }

    #[test]
    fn test_masochist_has_a_gap_below_it() {
        // eleven letters is too long for hard and too short for masochist
        let word = "programming";
        assert_eq!(word.len(), 11);
        assert!(Difficulty::ALL.iter().all(|d| !d.accepts(word)));
    }

    #[test]
    fn test_display_matches_cli_names() {
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!(Difficulty::Masochist.to_string(), "masochist");
        assert_eq!(Difficulty::from_str("hard", true).unwrap(), Difficulty::Hard);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let parsed: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
    }
}
