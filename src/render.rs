//! Pure mapping from a [`Session`] to the glyphs shown on screen.
//!
//! Nothing in here knows about terminals or colors; the ui layer decides how
//! each [`Glyph`] variant looks.

use std::ops::Range;

use itertools::{EitherOrBoth, Itertools};
use unicode_width::UnicodeWidthChar;

use crate::session::Session;

/// A single displayed character tagged with how it should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Correct(char),
    Incorrect(char),
    Untyped(char),
    Cursor(char),
}

impl Glyph {
    pub fn char(self) -> char {
        match self {
            Glyph::Correct(c) | Glyph::Incorrect(c) | Glyph::Untyped(c) | Glyph::Cursor(c) => c,
        }
    }

    pub fn width(self) -> usize {
        self.char().width().unwrap_or(0)
    }
}

/// Where a word sits relative to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordState {
    Completed,
    Current,
    Future,
}

pub type Line = Vec<Glyph>;

/// Everything needed to draw one screen of the typing test
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<Line>,
    pub progress: String,
    /// `(row, column)` of the cursor glyph, if it is on screen
    pub cursor: Option<(usize, usize)>,
}

impl Frame {
    /// Rows to show when only `max_rows` fit. The cursor row stays in view with
    /// one row of context above it; a finished passage shows its tail.
    pub fn visible_rows(&self, max_rows: usize) -> Range<usize> {
        let total = self.lines.len();
        let max_rows = max_rows.max(1);
        if total <= max_rows {
            return 0..total;
        }

        let focus = self.cursor.map_or(total - 1, |(row, _)| row);
        let context = (max_rows - 1).min(1);
        let start = focus.saturating_sub(context).min(total - max_rows);
        start..start + max_rows
    }

    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.iter().map(|g| g.char()).collect())
            .collect()
    }
}

pub fn visible_width(glyphs: &[Glyph]) -> usize {
    glyphs.iter().map(|g| g.width()).sum()
}

pub fn word_state(session: &Session, idx: usize) -> WordState {
    match idx.cmp(&session.current_word) {
        std::cmp::Ordering::Less => WordState::Completed,
        std::cmp::Ordering::Equal => WordState::Current,
        std::cmp::Ordering::Greater => WordState::Future,
    }
}

pub fn render(session: &Session, width: usize) -> Frame {
    let words = session
        .words
        .iter()
        .enumerate()
        .map(|(idx, target)| word_glyphs(session, idx, target))
        .collect();

    let lines = wrap(words, width);
    let cursor = locate_cursor(&lines);

    Frame {
        lines,
        progress: format!(
            "{}/{} words",
            session.current_word.min(session.words.len()),
            session.words.len()
        ),
        cursor,
    }
}

pub fn word_glyphs(session: &Session, idx: usize, target: &str) -> Vec<Glyph> {
    match word_state(session, idx) {
        WordState::Completed => match session.committed.get(&idx) {
            Some(typed) => completed_glyphs(target, typed),
            None => target.chars().map(Glyph::Correct).collect(),
        },
        WordState::Current => current_glyphs(target, &session.typed),
        WordState::Future => target.chars().map(Glyph::Untyped).collect(),
    }
}

fn completed_glyphs(target: &str, typed: &str) -> Vec<Glyph> {
    target
        .chars()
        .zip_longest(typed.chars())
        .map(|pair| match pair {
            EitherOrBoth::Both(expected, got) if expected == got => Glyph::Correct(expected),
            EitherOrBoth::Both(expected, _) | EitherOrBoth::Left(expected) => {
                Glyph::Incorrect(expected)
            }
            EitherOrBoth::Right(extra) => Glyph::Incorrect(extra),
        })
        .collect()
}

fn current_glyphs(target: &str, typed: &[char]) -> Vec<Glyph> {
    let cursor = typed.len();
    let mut glyphs: Vec<Glyph> = target
        .chars()
        .enumerate()
        .map(|(pos, expected)| match typed.get(pos) {
            Some(&got) if got == expected => Glyph::Correct(expected),
            Some(_) => Glyph::Incorrect(expected),
            None if pos == cursor => Glyph::Cursor(expected),
            None => Glyph::Untyped(expected),
        })
        .collect();

    let target_len = glyphs.len();
    glyphs.extend(typed.iter().skip(target_len).map(|&c| Glyph::Incorrect(c)));

    if cursor >= target_len {
        glyphs.push(Glyph::Cursor(' '));
    }

    glyphs
}

/// Greedy wrap: a word goes on the current line only while the line plus
/// the word stays within `width`. A word wider than `width` gets a line of
/// its own.
pub fn wrap(words: Vec<Vec<Glyph>>, width: usize) -> Vec<Line> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line: Line = Vec::new();
    let mut line_width = 0;

    for word in words {
        let word_width = visible_width(&word);

        if !line.is_empty() && line_width + word_width > width {
            lines.push(close_line(std::mem::take(&mut line)));
            line_width = 0;
        }

        line_width += word_width + 1;
        line.extend(word);
        line.push(Glyph::Untyped(' '));
    }

    if !line.is_empty() {
        lines.push(close_line(line));
    }

    lines
}

fn close_line(mut line: Line) -> Line {
    while line.last() == Some(&Glyph::Untyped(' ')) {
        line.pop();
    }
    line
}

fn locate_cursor(lines: &[Line]) -> Option<(usize, usize)> {
    lines.iter().enumerate().find_map(|(row, line)| {
        line.iter()
            .position(|g| matches!(g, Glyph::Cursor(_)))
            .map(|col| (row, visible_width(&line[..col])))
    })
}
