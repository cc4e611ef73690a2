use include_dir::{include_dir, Dir};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::difficulty::Difficulty;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

pub const EMBEDDED_LANGUAGE: &str = "english";
pub const MIN_WORD_LEN: usize = 3;

/// Failures while building the candidate pool. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum WordListError {
    #[error("unable to read word list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("word list {name} is not bundled with this build")]
    MissingEmbedded { name: String },

    #[error("word list {name}, line {line}: {content:?} is not a plain ascii word")]
    Malformed {
        name: String,
        line: usize,
        content: String,
    },

    #[error("word list {name} contains no words of at least {} letters", MIN_WORD_LEN)]
    Empty { name: String },

    #[error("word list {name} has no words for difficulty {difficulty}")]
    NoCandidates { name: String, difficulty: Difficulty },
}

/// The full candidate pool words are drawn from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Language {
    pub name: String,
    pub words: Vec<String>,
}

impl Language {
    /// Load the list bundled into the binary.
    pub fn embedded() -> Result<Self, WordListError> {
        let file_name = format!("{EMBEDDED_LANGUAGE}.txt");
        let source = LANG_DIR
            .get_file(&file_name)
            .and_then(|file| file.contents_utf8())
            .ok_or_else(|| WordListError::MissingEmbedded {
                name: EMBEDDED_LANGUAGE.to_string(),
            })?;

        Self::parse(EMBEDDED_LANGUAGE, source)
    }

    /// Load a plain text list, one word per line.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WordListError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::parse(&name, &source)
    }

    /// Blank lines and words shorter than [`MIN_WORD_LEN`] are skipped,
    /// anything that is not made of ascii letters is rejected.
    pub fn parse(name: &str, source: &str) -> Result<Self, WordListError> {
        let mut words = Vec::new();

        for (idx, line) in source.lines().enumerate() {
            let word = line.trim();
            if word.is_empty() {
                continue;
            }

            if !word.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(WordListError::Malformed {
                    name: name.to_string(),
                    line: idx + 1,
                    content: word.to_string(),
                });
            }

            if word.len() < MIN_WORD_LEN {
                continue;
            }

            words.push(word.to_ascii_lowercase());
        }

        if words.is_empty() {
            return Err(WordListError::Empty {
                name: name.to_string(),
            });
        }

        tracing::info!(language = name, words = words.len(), "loaded word list");

        Ok(Self {
            name: name.to_string(),
            words,
        })
    }

    pub fn candidates(&self, difficulty: Difficulty) -> Vec<&str> {
        self.words
            .iter()
            .map(String::as_str)
            .filter(|word| difficulty.accepts(word))
            .collect()
    }
}
