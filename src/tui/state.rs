//! TUI state algebra: pure types, zero effects.
//!
//! The round itself lives in [`QuizSession`]; the TUI only adds what the
//! screen needs on top of it (the option cursor, the quit flag). Which
//! screen is shown is derived from the session's phase, never stored.

use crossterm::event::KeyEvent;

use crate::session::{QuizSession, RevealToken};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Two producers feed a single mpsc channel:
/// - A key reader thread sends `Key` variants
/// - The reveal timer sends `RevealElapsed` once per answer
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// The reveal window for an answer has elapsed.
    RevealElapsed(RevealToken),
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// The session controller. Source of truth for the round.
    pub session: QuizSession,

    /// Highlighted option on the question screen.
    pub cursor: usize,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    pub fn new(session: QuizSession) -> Self {
        App {
            session,
            cursor: 0,
            should_quit: false,
        }
    }

    /// Number of options on the current question (0 when none is shown).
    pub fn option_count(&self) -> usize {
        self.session
            .current_question()
            .map_or(0, |q| q.options.len())
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the option cursor up.
    MoveUp,
    /// Move the option cursor down.
    MoveDown,
    /// Answer with the highlighted option (or retry on the result screen).
    Choose,
    /// Answer with the option at this 1-based position.
    ChooseNumber(u8),
    /// Start a fresh round.
    Retry,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a state transition.
///
/// Follows the Elm/TEA pattern: update describes WHAT should happen,
/// the effects layer decides HOW.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Re-render; nothing else to do.
    Stay,
    /// Quit the application.
    Quit,
    /// Execute a side effect.
    Effect(Effect),
}

/// Side effect requested by a transition.
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Start the reveal timer for an accepted answer.
    ScheduleReveal(RevealToken),
    /// Cancel any pending reveal and sample a new round.
    StartRound,
}

// ============================================================================
// TESTS
// ============================================================================
