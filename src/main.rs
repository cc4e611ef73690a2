use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    error::Error,
    fs::File,
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use typist::{
    app::{App, SessionSettings},
    config::{Config, ConfigStore, FileConfigStore},
    language::{Difficulty, Language},
    runtime::{CrosstermInputSource, RunOutcome, Runner},
};

/// minimal terminal typing test with live per-character feedback
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about,
    long_about = "Type a random passage of words as fast and as accurately as you can. Press tab then space to restart with a new passage, esc or ctrl+c to quit."
)]
pub struct Cli {
    /// number of words to use in test [default: 25]
    #[arg(short = 'l', long = "length", value_parser = parse_word_count)]
    length: Option<usize>,

    /// word length band to draw words from [default: normal]
    #[arg(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// plain text word list (one word per line) to use instead of the bundled one
    #[arg(long)]
    words_file: Option<PathBuf>,

    /// write logs to this file; RUST_LOG selects the level
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// remember the chosen length and difficulty as the new defaults
    #[arg(long)]
    save_defaults: bool,
}

impl Cli {
    /// Command line flags win over the config file.
    fn settings(&self, config: Config) -> SessionSettings {
        SessionSettings {
            number_of_words: self.length.unwrap_or(config.number_of_words).max(1),
            difficulty: self.difficulty.unwrap_or(config.difficulty),
        }
    }
}

fn parse_word_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("the test needs at least one word".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn init_logging(path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        .with(filter)
        .init();

    Ok(())
}

/// Raw mode and the alternate screen, undone when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // from here on a failed setup still restores through drop
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "failed to leave raw mode");
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
            tracing::warn!(error = %e, "failed to restore screen");
        }
    }
}

fn load_language(cli: &Cli) -> Result<Language, typist::language::WordListError> {
    match &cli.words_file {
        Some(path) => Language::from_file(path),
        None => Language::embedded(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let store = FileConfigStore::new();
    let settings = cli.settings(store.load());
    if cli.save_defaults {
        store.save(&Config::from(&settings))?;
        tracing::info!(path = %store.path().display(), "saved defaults");
    }

    let mut app = match load_language(&cli).and_then(|lang| App::new(&lang, settings)) {
        Ok(app) => app,
        Err(e) => Cli::command().error(ErrorKind::InvalidValue, e).exit(),
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    // the guard restores the terminal before anything is reported, on every path
    let outcome = {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        Runner::new(CrosstermInputSource).run(&mut app, |app| {
            terminal.draw(|f| f.render_widget(app, f.area()))?;
            Ok(())
        })
    };

    if let RunOutcome::Completed(stats) = outcome? {
        println!("{}", stats.report());
    }

    Ok(())
}
