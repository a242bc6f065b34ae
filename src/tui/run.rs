//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! and owns the RNG and the reveal timer.
//!
//! Architecture: two producers feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key events
//! - Reveal timer: one thread per answer, cancelled on restart
//! The event loop consumes from the channel, dispatching to handlers.

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::report::RoundSummary;
use crate::session::{QuizSession, RevealToken};
use crate::timer::{PendingTimer, schedule};
use crate::types::{QuestionBank, RoundConfig};

use super::state::{Action, App, AppEvent, Effect, Transition};
use super::update::{handle_background_event, update};
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),

        // Answering
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Choose),
        KeyCode::Char(c @ '1'..='9') => Some(Action::ChooseNumber(c as u8 - b'0')),

        // Round control
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Retry),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key presses to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(_) => {} // ignore releases, mouse, resize, etc.
                Err(_) => break,
            }
        }
    });
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Everything the effects need besides the App: RNG, timer, channel.
pub struct Effects {
    tx: mpsc::Sender<AppEvent>,
    rng: StdRng,
    reveal_delay: Duration,
    reveal_timer: Option<(RevealToken, PendingTimer)>,
}

impl Effects {
    pub fn new(tx: mpsc::Sender<AppEvent>, config: &RoundConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Effects {
            tx,
            rng,
            reveal_delay: config.reveal_delay,
            reveal_timer: None,
        }
    }

    /// Execute a side effect requested by a transition.
    pub fn handle(&mut self, effect: Effect, app: &mut App) {
        match effect {
            Effect::ScheduleReveal(token) => {
                // At most one reveal is pending; replacing the handle cancels the old one.
                let timer = schedule(self.reveal_delay, AppEvent::RevealElapsed(token), self.tx.clone());
                self.reveal_timer = Some((token, timer));
            }
            Effect::StartRound => self.start_round(app),
        }
    }

    /// Cancel any pending reveal, then sample a new round.
    pub fn start_round(&mut self, app: &mut App) {
        if let Some((_, timer)) = self.reveal_timer.take() {
            timer.cancel();
        }
        app.cursor = 0;
        if let Err(e) = app.session.reset(&mut self.rng) {
            tracing::error!(error = %e, "could not start a round");
        }
    }

    /// Apply a timer or other background event to the app.
    ///
    /// The held timer handle is released once its own reveal has fired.
    pub fn deliver(&mut self, event: AppEvent, app: &mut App) {
        if let AppEvent::RevealElapsed(token) = &event {
            if self.reveal_timer.as_ref().is_some_and(|(pending, _)| pending == token) {
                self.reveal_timer = None;
            }
        }
        handle_background_event(app, event);
    }

    pub fn has_pending_reveal(&self) -> bool {
        self.reveal_timer.is_some()
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the interactive quiz until the user quits.
///
/// Returns the summary of the round on screen when the user quit
/// (None if no round was ever loaded).
pub fn run(bank: QuestionBank, config: &RoundConfig) -> io::Result<Option<RoundSummary>> {
    let (tx, rx) = mpsc::channel::<AppEvent>();

    let mut app = App::new(QuizSession::new(bank, config));
    let mut effects = Effects::new(tx.clone(), config);
    effects.start_round(&mut app);

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    spawn_key_reader(tx);

    loop {
        // Render
        terminal.draw(|frame| render(&app, frame))?;

        // Check quit flag
        if app.should_quit {
            break;
        }

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // all senders dropped
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(key) {
                    match update(&mut app, &action) {
                        Transition::Stay => {}
                        Transition::Quit => app.should_quit = true,
                        Transition::Effect(effect) => effects.handle(effect, &mut app),
                    }
                }
            }
            background_event => effects.deliver(background_event, &mut app),
        }
    }

    restore_terminal()?;
    Ok(RoundSummary::from_session(&app.session))
}

// ============================================================================
// TESTS
// ============================================================================
