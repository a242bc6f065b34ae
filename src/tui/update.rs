//! State transitions: (App, Action) → Transition.
//!
//! Fully testable without a terminal. Each phase defines which actions it
//! accepts. Unhandled actions leave the app unchanged (no-op).

use crate::session::{Phase, Selection};

use super::state::{Action, App, AppEvent, Effect, Transition};

/// Apply a user action.
///
/// Answers are recorded in the session right away; the reveal timer and
/// new rounds are requested as effects.
pub fn update(app: &mut App, action: &Action) -> Transition {
    match app.session.phase() {
        Phase::Idle => update_idle(action),
        Phase::InProgress => update_question(app, action),
        Phase::Revealing => update_revealing(action),
        Phase::Complete => update_complete(action),
    }
}

/// Apply an event produced by a background thread.
pub fn handle_background_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::RevealElapsed(token) => {
            if app.session.finish_reveal(token) {
                app.cursor = 0;
            }
        }
        // Keys are routed through map_key → update by the event loop
        AppEvent::Key(_) => {}
    }
}

// ============================================================================
// PER-PHASE HANDLERS
// ============================================================================

/// Idle: nothing to answer. Retry samples a round.
fn update_idle(action: &Action) -> Transition {
    match action {
        Action::Retry => Transition::Effect(Effect::StartRound),
        Action::Quit => Transition::Quit,
        _ => Transition::Stay,
    }
}

/// Question open: cursor movement, answering, restarting.
fn update_question(app: &mut App, action: &Action) -> Transition {
    let len = app.option_count();

    match action {
        Action::MoveUp => {
            app.cursor = app.cursor.saturating_sub(1);
            Transition::Stay
        }
        Action::MoveDown => {
            app.cursor = if len == 0 { 0 } else { (app.cursor + 1).min(len - 1) };
            Transition::Stay
        }
        Action::Choose => {
            let index = app.cursor;
            answer(app, index)
        }
        Action::ChooseNumber(n) => {
            let index = usize::from(*n).saturating_sub(1);
            if *n == 0 || index >= len {
                return Transition::Stay;
            }
            app.cursor = index;
            answer(app, index)
        }
        Action::Retry => Transition::Effect(Effect::StartRound),
        Action::Quit => Transition::Quit,
    }
}

/// Reveal window: answers are locked. Restart and quit still work.
fn update_revealing(action: &Action) -> Transition {
    match action {
        Action::Retry => Transition::Effect(Effect::StartRound),
        Action::Quit => Transition::Quit,
        _ => Transition::Stay,
    }
}

/// Result screen: Retry or Enter plays again.
fn update_complete(action: &Action) -> Transition {
    match action {
        Action::Retry | Action::Choose => Transition::Effect(Effect::StartRound),
        Action::Quit => Transition::Quit,
        _ => Transition::Stay,
    }
}

fn answer(app: &mut App, index: usize) -> Transition {
    match app.session.select_index(index) {
        Selection::Accepted { token, .. } => Transition::Effect(Effect::ScheduleReveal(token)),
        Selection::Ignored(_) => Transition::Stay,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::QuizSession;
    use crate::types::{QuestionBank, QuestionRecord, RoundConfig};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bank_of(n: usize) -> QuestionBank {
        (0..n)
            .map(|i| QuestionRecord::new(format!("Q{}", i), ["a", "b", "c", "d"], "a"))
            .collect::<Vec<_>>()
            .into()
    }

    fn app_in_round(n: usize) -> App {
        let mut session = QuizSession::new(bank_of(n), &RoundConfig::default());
        session.start_round(&mut StdRng::seed_from_u64(8)).unwrap();
        App::new(session)
    }

    fn reveal_token(transition: Transition) -> crate::session::RevealToken {
        match transition {
            Transition::Effect(Effect::ScheduleReveal(token)) => token,
            other => panic!("Expected ScheduleReveal, got {:?}", other),
        }
    }

    // -- Idle --

    #[test]
    fn idle_retry_starts_round() {
        let mut app = App::new(QuizSession::new(bank_of(3), &RoundConfig::default()));
        assert_eq!(update(&mut app, &Action::Retry), Transition::Effect(Effect::StartRound));
    }

    #[test]
    fn idle_ignores_choose() {
        let mut app = App::new(QuizSession::new(bank_of(3), &RoundConfig::default()));
        assert_eq!(update(&mut app, &Action::Choose), Transition::Stay);
    }

    // -- Question --

    #[test]
    fn cursor_up_at_top_stays() {
        let mut app = app_in_round(3);
        update(&mut app, &Action::MoveUp);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn cursor_down_clamps_at_last_option() {
        let mut app = app_in_round(3);
        for _ in 0..10 {
            update(&mut app, &Action::MoveDown);
        }
        assert_eq!(app.cursor, 3);
    }

    #[test]
    fn choose_answers_highlighted_option() {
        let mut app = app_in_round(3);
        update(&mut app, &Action::MoveDown);
        let expected = app.session.current_question().unwrap().options[1].clone();

        let transition = update(&mut app, &Action::Choose);
        reveal_token(transition);
        assert_eq!(app.session.phase(), Phase::Revealing);
        assert_eq!(
            app.session.state().unwrap().selected_option.as_deref(),
            Some(expected.as_str())
        );
    }

    #[test]
    fn number_key_answers_and_moves_cursor() {
        let mut app = app_in_round(3);
        let expected = app.session.current_question().unwrap().options[2].clone();
        reveal_token(update(&mut app, &Action::ChooseNumber(3)));
        assert_eq!(app.cursor, 2);
        assert_eq!(
            app.session.state().unwrap().selected_option.as_deref(),
            Some(expected.as_str())
        );
    }

    #[test]
    fn number_key_out_of_range_is_noop() {
        let mut app = app_in_round(3);
        assert_eq!(update(&mut app, &Action::ChooseNumber(9)), Transition::Stay);
        assert_eq!(update(&mut app, &Action::ChooseNumber(0)), Transition::Stay);
        assert_eq!(app.session.phase(), Phase::InProgress);
    }

    #[test]
    fn quit_from_question() {
        let mut app = app_in_round(3);
        assert_eq!(update(&mut app, &Action::Quit), Transition::Quit);
    }

    // -- Revealing --

    #[test]
    fn answers_locked_during_reveal() {
        let mut app = app_in_round(3);
        reveal_token(update(&mut app, &Action::ChooseNumber(1)));
        let before = app.session.state().unwrap().clone();

        assert_eq!(update(&mut app, &Action::ChooseNumber(2)), Transition::Stay);
        assert_eq!(update(&mut app, &Action::Choose), Transition::Stay);
        assert_eq!(app.session.state().unwrap(), &before);
    }

    #[test]
    fn retry_during_reveal_requests_new_round() {
        let mut app = app_in_round(3);
        reveal_token(update(&mut app, &Action::Choose));
        assert_eq!(update(&mut app, &Action::Retry), Transition::Effect(Effect::StartRound));
    }

    #[test]
    fn reveal_elapsed_advances_and_resets_cursor() {
        let mut app = app_in_round(3);
        update(&mut app, &Action::MoveDown);
        let token = reveal_token(update(&mut app, &Action::Choose));

        handle_background_event(&mut app, AppEvent::RevealElapsed(token));
        assert_eq!(app.cursor, 0);
        assert_eq!(app.session.phase(), Phase::InProgress);
        assert_eq!(app.session.question_number(), Some(2));
    }

    #[test]
    fn stale_reveal_leaves_cursor() {
        let mut app = app_in_round(3);
        let token = reveal_token(update(&mut app, &Action::Choose));
        handle_background_event(&mut app, AppEvent::RevealElapsed(token));
        update(&mut app, &Action::MoveDown);

        handle_background_event(&mut app, AppEvent::RevealElapsed(token));
        assert_eq!(app.cursor, 1);
        assert_eq!(app.session.question_number(), Some(2));
    }

    // -- Complete --

    #[test]
    fn complete_enter_or_retry_starts_round() {
        let mut app = app_in_round(1);
        let token = reveal_token(update(&mut app, &Action::Choose));
        handle_background_event(&mut app, AppEvent::RevealElapsed(token));
        assert_eq!(app.session.phase(), Phase::Complete);

        assert_eq!(update(&mut app, &Action::Choose), Transition::Effect(Effect::StartRound));
        assert_eq!(update(&mut app, &Action::Retry), Transition::Effect(Effect::StartRound));
        assert_eq!(update(&mut app, &Action::MoveDown), Transition::Stay);
        assert_eq!(update(&mut app, &Action::Quit), Transition::Quit);
    }
}
