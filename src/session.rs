use std::collections::HashMap;
use std::time::Instant;

/// Ordered passage of target words for one attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.words.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.words.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for WordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A single input event the session understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Space,
    Backspace,
    Tab,
    /// Any other key; it only disarms a pending restart
    Other,
}

/// What the host should do after a keystroke was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Restart,
    Finished,
}

/// State of one typing attempt.
///
/// `typed` holds the buffer of the current word only; finished words live in
/// `committed` until backward navigation pulls one of them back out.
#[derive(Debug, Clone)]
pub struct Session {
    pub words: WordList,
    pub current_word: usize,
    pub typed: Vec<char>,
    pub committed: HashMap<usize, String>,
    pub correct_chars: usize,
    pub total_chars: usize,
    pub started_at: Option<Instant>,
    pub ended_at: Option<Instant>,
    pub tab_pending: bool,
}

impl Session {
    pub fn new(words: WordList) -> Self {
        let mut session = Self {
            words,
            current_word: 0,
            typed: Vec::new(),
            committed: HashMap::new(),
            correct_chars: 0,
            total_chars: 0,
            started_at: None,
            ended_at: None,
            tab_pending: false,
        };
        session.finish_if_complete();
        session
    }

    pub fn current_target(&self) -> Option<&str> {
        self.words.get(self.current_word)
    }

    pub fn cursor_pos(&self) -> usize {
        self.typed.len()
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_complete(&self) -> bool {
        if self.current_word >= self.words.len() {
            return true;
        }

        self.current_word + 1 == self.words.len() && self.typed_matches_current()
    }

    /// Single entry point used by the event loop.
    pub fn handle(&mut self, key: Keystroke) -> Transition {
        let transition = match key {
            Keystroke::Char(c) => {
                self.accept_character(c);
                Transition::Continue
            }
            Keystroke::Space => self.space(),
            Keystroke::Backspace => {
                self.backspace();
                Transition::Continue
            }
            Keystroke::Tab => {
                self.tab();
                Transition::Continue
            }
            Keystroke::Other => {
                self.tab_pending = false;
                Transition::Continue
            }
        };

        match transition {
            Transition::Continue if self.is_complete() => Transition::Finished,
            other => other,
        }
    }

    pub fn accept_character(&mut self, c: char) {
        self.tab_pending = false;
        if self.is_complete() {
            return;
        }

        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }

        let idx = self.typed.len();
        if self.expected_char(idx) == Some(c) {
            self.correct_chars += 1;
        }
        self.total_chars += 1;
        self.typed.push(c);

        self.finish_if_complete();
    }

    pub fn backspace(&mut self) {
        self.tab_pending = false;
        if self.is_complete() {
            return;
        }

        match self.typed.pop() {
            Some(removed) => {
                let idx = self.typed.len();
                if self.expected_char(idx) == Some(removed) {
                    self.correct_chars = self.correct_chars.saturating_sub(1);
                }
                self.total_chars = self.total_chars.saturating_sub(1);
            }
            None if self.can_move_back() => {
                self.current_word -= 1;
                let restored = self
                    .committed
                    .remove(&self.current_word)
                    .unwrap_or_default();
                self.typed = restored.chars().collect();
            }
            None => {}
        }
    }

    pub fn space(&mut self) -> Transition {
        if self.tab_pending {
            self.tab_pending = false;
            return Transition::Restart;
        }

        if self.is_complete() {
            return Transition::Finished;
        }

        self.commit_current();
        self.finish_if_complete();

        if self.is_complete() {
            Transition::Finished
        } else {
            Transition::Continue
        }
    }

    pub fn tab(&mut self) {
        self.tab_pending = true;
    }

    /// Words typed exactly right are locked; stepping back is only allowed
    /// while none of the earlier words were.
    pub fn can_move_back(&self) -> bool {
        self.current_word > 0
            && (0..self.current_word).all(|idx| {
                match (self.committed.get(&idx), self.words.get(idx)) {
                    (Some(typed), Some(target)) => typed != target,
                    _ => true,
                }
            })
    }

    fn expected_char(&self, idx: usize) -> Option<char> {
        self.current_target()
            .and_then(|target| target.chars().nth(idx))
    }

    fn typed_matches_current(&self) -> bool {
        match self.current_target() {
            Some(target) => target.chars().eq(self.typed.iter().copied()),
            None => false,
        }
    }

    fn commit_current(&mut self) {
        let typed: String = self.typed.drain(..).collect();
        self.committed.insert(self.current_word, typed);
        self.current_word += 1;
    }

    /// Commits the final word when it was typed exactly and stamps the end time.
    fn finish_if_complete(&mut self) {
        if self.ended_at.is_some() || !self.is_complete() {
            return;
        }

        if self.current_word < self.words.len() {
            self.commit_current();
        }

        self.ended_at = Some(Instant::now());
        tracing::info!(
            words = self.current_word,
            correct = self.correct_chars,
            total = self.total_chars,
            "session complete"
        );
    }
}
