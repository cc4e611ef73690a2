use std::collections::VecDeque;
use std::io;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, AppAction};
use crate::session::Keystroke;
use crate::stats::Statistics;

/// Raw terminal input the runner cares about
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize,
}

/// What a raw event means to the typing loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Keystroke(Keystroke),
    Interrupt,
    Redraw,
    Ignore,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait InputSource {
    /// Block until the next event arrives. `None` means the source is exhausted.
    fn next_event(&mut self) -> io::Result<Option<InputEvent>>;
}

/// Production event source reading straight from crossterm
#[derive(Debug, Default)]
pub struct CrosstermInputSource;

impl InputSource for CrosstermInputSource {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        loop {
            match event::read()? {
                CtEvent::Key(key) => return Ok(Some(InputEvent::Key(key))),
                CtEvent::Resize(_, _) => return Ok(Some(InputEvent::Resize)),
                _ => {}
            }
        }
    }
}

/// Pre-recorded event source for headless runs and tests
#[derive(Debug, Default)]
pub struct ScriptedInputSource {
    events: VecDeque<InputEvent>,
}

impl ScriptedInputSource {
    pub fn new<I: IntoIterator<Item = InputEvent>>(events: I) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Key presses for every char of `text`; spaces become space presses.
    pub fn typing(text: &str) -> Self {
        Self::new(text.chars().map(|c| InputEvent::Key(key(KeyCode::Char(c)))))
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn push_key(&mut self, code: KeyCode) {
        self.push(InputEvent::Key(key(code)));
    }
}

impl InputSource for ScriptedInputSource {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn translate(event: &InputEvent) -> Command {
    let key = match event {
        InputEvent::Resize => return Command::Redraw,
        InputEvent::Key(key) => key,
    };

    if key.kind == KeyEventKind::Release {
        return Command::Ignore;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Interrupt,
        KeyCode::Esc => Command::Interrupt,
        KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Command::Keystroke(Keystroke::Other)
        }
        KeyCode::Char(' ') => Command::Keystroke(Keystroke::Space),
        KeyCode::Char(c) => Command::Keystroke(Keystroke::Char(c)),
        KeyCode::Backspace => Command::Keystroke(Keystroke::Backspace),
        KeyCode::Tab => Command::Keystroke(Keystroke::Tab),
        _ => Command::Keystroke(Keystroke::Other),
    }
}

/// How the loop ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    Completed(Statistics),
    Interrupted,
}

/// Drives the app one event at a time: read, apply, redraw
pub struct Runner<S: InputSource> {
    source: S,
}

impl<S: InputSource> Runner<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Blocks for the next event and translates it
    pub fn step(&mut self) -> io::Result<Option<Command>> {
        Ok(self.source.next_event()?.as_ref().map(translate))
    }

    pub fn run<D>(&mut self, app: &mut App, mut draw: D) -> io::Result<RunOutcome>
    where
        D: FnMut(&App) -> io::Result<()>,
    {
        draw(app)?;

        loop {
            let Some(command) = self.step()? else {
                tracing::debug!("input source exhausted");
                return Ok(RunOutcome::Interrupted);
            };

            match command {
                Command::Interrupt => {
                    tracing::info!("interrupted");
                    return Ok(RunOutcome::Interrupted);
                }
                Command::Redraw => {}
                Command::Ignore => {
                    tracing::trace!("ignored input");
                    continue;
                }
                Command::Keystroke(keystroke) => match app.on_keystroke(keystroke) {
                    AppAction::Redraw => {}
                    AppAction::Finished(stats) => {
                        draw(app)?;
                        return Ok(RunOutcome::Completed(stats));
                    }
                },
            }

            draw(app)?;
        }
    }
}
