use std::time::Duration;

use assert_matches::assert_matches;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use typist::app::{App, SessionSettings};
use typist::language::{Difficulty, Language};
use typist::render::{render, visible_width};
use typist::runtime::{InputEvent, RunOutcome, Runner, ScriptedInputSource};
use typist::session::{Keystroke, Session};
use typist::stats::Statistics;

// Headless integration using the internal runtime without a TTY.
fn test_app(words: &[&str]) -> App {
    let language = Language::embedded().unwrap();
    let mut app = App::with_seed(
        &language,
        SessionSettings {
            number_of_words: 10,
            difficulty: Difficulty::Easy,
        },
        11,
    )
    .unwrap();
    app.session = Session::new(words.iter().copied().collect());
    app
}

fn passage(app: &App) -> String {
    app.session
        .words
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn headless_typing_flow_completes() {
    let mut app = test_app(&["cat", "dog"]);
    let mut runner = Runner::new(ScriptedInputSource::typing("cat dog"));
    let mut frames = 0;

    let outcome = runner
        .run(&mut app, |_| {
            frames += 1;
            Ok(())
        })
        .unwrap();

    assert_matches!(outcome, RunOutcome::Completed(stats) => {
        assert_eq!(stats.words_typed, 2);
        assert_eq!(stats.correct_chars, 6);
        assert_eq!(stats.total_chars, 6);
        assert_eq!(stats.accuracy, 100.0);
    });
    // initial draw, one per keystroke
    assert_eq!(frames, 8);
}

#[test]
fn end_to_end_one_second_run() {
    let mut session = Session::new(["cat", "dog"].into_iter().collect());
    for c in "cat dog".chars() {
        session.handle(match c {
            ' ' => Keystroke::Space,
            c => Keystroke::Char(c),
        });
    }
    assert!(session.is_complete());

    let start = session.started_at.unwrap();
    session.ended_at = Some(start + Duration::from_secs(1));
    let stats = Statistics::from_session(&session);

    assert_eq!(stats.words_typed, 2);
    assert_eq!(stats.correct_chars, 6);
    assert_eq!(stats.total_chars, 6);
    assert_eq!(stats.accuracy, 100.0);
    assert_eq!(stats.wpm, 120.0);
    assert_eq!(stats.duration_secs, 1.0);
}

#[test]
fn headless_mistyped_word_counts() {
    let mut app = test_app(&["cat", "dog"]);
    let mut runner = Runner::new(ScriptedInputSource::typing("cot dog"));

    let outcome = runner.run(&mut app, |_| Ok(())).unwrap();

    assert_matches!(outcome, RunOutcome::Completed(stats) => {
        assert_eq!(stats.correct_chars, 5);
        assert_eq!(stats.total_chars, 6);
        assert_eq!(stats.accuracy, 83.33);
    });
    assert_eq!(app.session.committed.get(&0).map(String::as_str), Some("cot"));
}

#[test]
fn headless_correction_by_moving_back() {
    let mut app = test_app(&["cat", "dog"]);
    let mut source = ScriptedInputSource::typing("cot ");
    source.push_key(KeyCode::Backspace); // back into "cot"
    source.push_key(KeyCode::Backspace);
    source.push_key(KeyCode::Backspace);
    for c in "at dog".chars() {
        source.push_key(KeyCode::Char(c));
    }
    let mut runner = Runner::new(source);

    let outcome = runner.run(&mut app, |_| Ok(())).unwrap();

    assert_matches!(outcome, RunOutcome::Completed(stats) => {
        assert_eq!(stats.total_chars, 6);
        assert_eq!(stats.correct_chars, 6);
    });
}

#[test]
fn headless_escape_interrupts() {
    let mut app = test_app(&["cat", "dog"]);
    let mut source = ScriptedInputSource::typing("ca");
    source.push_key(KeyCode::Esc);
    source.push_key(KeyCode::Char('t'));
    let mut runner = Runner::new(source);

    let outcome = runner.run(&mut app, |_| Ok(())).unwrap();

    assert_eq!(outcome, RunOutcome::Interrupted);
    assert_eq!(app.session.typed, vec!['c', 'a']);
}

#[test]
fn headless_ctrl_c_interrupts() {
    let mut app = test_app(&["cat"]);
    let source = ScriptedInputSource::new([InputEvent::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    ))]);

    let outcome = Runner::new(source).run(&mut app, |_| Ok(())).unwrap();

    assert_eq!(outcome, RunOutcome::Interrupted);
    assert_eq!(app.session.total_chars, 0);
}

#[test]
fn headless_restart_then_finish() {
    let language = Language::embedded().unwrap();
    let mut app = App::with_seed(
        &language,
        SessionSettings {
            number_of_words: 3,
            difficulty: Difficulty::Normal,
        },
        99,
    )
    .unwrap();

    let first = app.session.words.clone();
    let mut source = ScriptedInputSource::typing("zz");
    source.push_key(KeyCode::Tab);
    source.push_key(KeyCode::Char(' '));
    let mut runner = Runner::new(source);

    // script runs out right after the restart
    let outcome = runner.run(&mut app, |_| Ok(())).unwrap();
    assert_eq!(outcome, RunOutcome::Interrupted);
    assert_eq!(app.restarts, 1);
    assert_eq!(app.session.current_word, 0);
    assert_eq!(app.session.total_chars, 0);
    assert_eq!(app.session.words.len(), first.len());

    let mut runner = Runner::new(ScriptedInputSource::typing(&passage(&app)));
    let outcome = runner.run(&mut app, |_| Ok(())).unwrap();

    assert_matches!(outcome, RunOutcome::Completed(stats) => {
        assert_eq!(stats.words_typed, 3);
        assert_eq!(stats.accuracy, 100.0);
    });
}

#[test]
fn headless_enter_between_tab_and_space_keeps_session() {
    let mut app = test_app(&["cat", "dog"]);
    let mut source = ScriptedInputSource::typing("cat");
    source.push_key(KeyCode::Tab);
    source.push_key(KeyCode::Enter);
    source.push_key(KeyCode::Char(' '));
    let mut runner = Runner::new(source);

    let outcome = runner.run(&mut app, |_| Ok(())).unwrap();

    assert_eq!(outcome, RunOutcome::Interrupted);
    assert_eq!(app.restarts, 0);
    assert_eq!(app.session.current_word, 1);
    assert_eq!(app.session.committed.get(&0).map(String::as_str), Some("cat"));
}

#[test]
fn frames_stay_within_width_while_typing() {
    let mut app = test_app(&["the", "quick", "brown", "fox"]);
    let mut runner = Runner::new(ScriptedInputSource::typing("the quixk brown"));
    let mut widest = 0;

    runner
        .run(&mut app, |app| {
            let frame = render(&app.session, 20);
            widest = frame
                .lines
                .iter()
                .map(|l| visible_width(l))
                .max()
                .unwrap_or(0)
                .max(widest);
            Ok(())
        })
        .unwrap();

    assert!(widest <= 20);
}

#[test]
fn draw_errors_propagate() {
    let mut app = test_app(&["cat"]);
    let mut runner = Runner::new(ScriptedInputSource::typing("cat"));

    let result = runner.run(&mut app, |_| Err(std::io::Error::other("boom")));

    assert!(result.is_err());
}
