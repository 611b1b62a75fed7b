use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use predictor::{ArtifactStore, PersistPolicy, PredictorConfig};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::state::session::Session;
use crate::ui::screens::{unavailable, Action, Screen};

type Term = Terminal<CrosstermBackend<Stdout>>;

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the TUI application.
///
/// Artifacts are loaded once before the first frame. If they cannot be
/// loaded the only screen is the error, and nothing is written on exit.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails, or if the
/// artifacts cannot be written back under [`PersistPolicy::Always`].
pub fn run(config: PredictorConfig) -> Result<()> {
    let store = ArtifactStore::from_config(&config);
    let loaded = store.load();

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let session = match loaded {
        Ok(predictor) => Session::new(predictor, config.strictness),
        Err(e) => {
            error!("cannot start a session: {e}");
            show_unavailable(&mut terminal, unavailable::UnavailableState::new(e.to_string()))?;
            terminal.show_cursor()?;
            return Ok(());
        }
    };

    event_loop(&mut terminal, &session)?;
    terminal.show_cursor()?;
    drop(guard);

    if config.persist == PersistPolicy::Always {
        store.persist(session.predictor()).with_context(|| {
            format!(
                "failed to write artifacts to {} and {}",
                store.model_path().display(),
                store.scaler_path().display()
            )
        })?;
        info!("artifacts written back on exit");
    }

    Ok(())
}

fn event_loop(terminal: &mut Term, session: &Session) -> Result<()> {
    let mut screen = Screen::menu();

    loop {
        terminal.draw(|f| screen.draw(f))?;

        if let Some(key) = next_key()? {
            match screen.handle_key(key, session) {
                Action::Quit => break,
                Action::Transition(next) => screen = next,
                Action::None => {}
            }
        }
    }

    Ok(())
}

fn show_unavailable(terminal: &mut Term, state: unavailable::UnavailableState) -> Result<()> {
    loop {
        terminal.draw(|f| unavailable::draw(f, &state))?;

        if let Some(key) = next_key()? {
            if unavailable::handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn next_key() -> Result<Option<KeyCode>> {
    if !event::poll(Duration::from_millis(120))? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(k) if k.kind == KeyEventKind::Press => Ok(Some(k.code)),
        _ => Ok(None),
    }
}
