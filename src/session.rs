//! Quiz session controller: the round state machine.
//!
//! Owns all mutable round state. Every operation is a synchronous
//! transition over [`SessionState`]; rendering reads the state and never
//! writes it. The reveal delay is not timed here: `select_option` hands out
//! a [`RevealToken`] and the caller returns it via `finish_reveal` once the
//! delay has elapsed. Tokens from a replaced round are rejected, so a late
//! timer can never advance a fresh round.
//!
//! ```text
//!   Idle ──start_round──▶ InProgress ──select_option──▶ Revealing
//!                             ▲                             │
//!                             └──── finish_reveal ──────────┤
//!                                   (more questions)        │ finish_reveal
//!   any ───── reset ─────▶ InProgress                       ▼ (last one)
//!                                                        Complete
//! ```

use rand::Rng;

use crate::error::QuizError;
use crate::shuffle::sample_round;
use crate::types::{QuestionBank, QuestionRecord, RoundConfig};

// ============================================================================
// STATE
// ============================================================================

/// Observable phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No round loaded yet (or the last start found an empty bank).
    Idle,
    /// Waiting for an answer to the current question.
    InProgress,
    /// An answer was chosen; waiting for the reveal delay to elapse.
    Revealing,
    /// Every question answered.
    Complete,
}

/// State of one round. Replaced wholesale on every start/reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Sampled questions, each with its own shuffled option order.
    pub round_questions: Vec<QuestionRecord>,
    /// Index of the question being asked. Equals the round length once over.
    pub current_index: usize,
    /// The chosen option during the reveal window.
    pub selected_option: Option<String>,
    /// Correct answers so far in this round.
    pub correct_count: usize,
    /// True once the last question's reveal finished.
    pub is_over: bool,
    /// Chosen option per answered question, in round order.
    pub answers: Vec<String>,
}

impl SessionState {
    fn fresh(round_questions: Vec<QuestionRecord>) -> Self {
        SessionState {
            round_questions,
            current_index: 0,
            selected_option: None,
            correct_count: 0,
            is_over: false,
            answers: Vec::new(),
        }
    }

    /// The question currently on screen, if the round isn't over.
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        if self.is_over {
            None
        } else {
            self.round_questions.get(self.current_index)
        }
    }
}

/// Ties a reveal expiry to the round and question that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealToken {
    round: u64,
    question: usize,
}

/// Why a selection was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No question is being asked (idle or complete).
    NoActiveQuestion,
    /// A reveal is already pending for this question.
    RevealPending,
    /// The option doesn't belong to the current question.
    UnknownOption,
}

/// Outcome of `select_option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The answer was recorded. Hand `token` back after the reveal delay.
    Accepted { token: RevealToken, correct: bool },
    /// Nothing changed.
    Ignored(Rejection),
}

// ============================================================================
// CONTROLLER
// ============================================================================

/// The quiz session controller.
#[derive(Debug)]
pub struct QuizSession {
    bank: QuestionBank,
    round_size: usize,
    state: Option<SessionState>,
    /// Bumped on every start/reset; stale tokens carry an older value.
    round: u64,
    pending: Option<RevealToken>,
}

impl QuizSession {
    /// Create an idle controller over `bank`. No round is loaded yet.
    pub fn new(bank: QuestionBank, config: &RoundConfig) -> Self {
        QuizSession {
            bank,
            round_size: config.round_size,
            state: None,
            round: 0,
            pending: None,
        }
    }

    /// Sample a new round and replace all round state.
    ///
    /// Any pending reveal is invalidated.
    ///
    /// # Errors
    /// Returns `QuizError::EmptyQuestionBank` when there is nothing to ask
    /// and `QuizError::ZeroRoundSize` when the round would hold no questions.
    /// Either way the controller is left idle.
    pub fn start_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), QuizError> {
        self.round += 1;
        self.pending = None;

        if self.bank.is_empty() {
            self.state = None;
            tracing::warn!("cannot start a round: question bank is empty");
            return Err(QuizError::EmptyQuestionBank);
        }
        if self.round_size == 0 {
            self.state = None;
            tracing::warn!("cannot start a round: round size is 0");
            return Err(QuizError::ZeroRoundSize);
        }

        let questions = sample_round(&self.bank, self.round_size, rng);
        if questions.len() < self.round_size {
            tracing::warn!(
                requested = self.round_size,
                available = questions.len(),
                "question bank is smaller than the round size"
            );
        }
        tracing::info!(round = self.round, questions = questions.len(), "round started");

        self.state = Some(SessionState::fresh(questions));
        Ok(())
    }

    /// Start over from any state. Same as [`start_round`](Self::start_round).
    ///
    /// # Errors
    /// See `start_round`.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), QuizError> {
        self.start_round(rng)
    }

    /// Answer the current question.
    ///
    /// Accepted only while a question is open and no reveal is pending, and
    /// only for one of the current question's options. Otherwise a no-op.
    pub fn select_option(&mut self, option: &str) -> Selection {
        let Some(state) = self.state.as_mut() else {
            return Selection::Ignored(Rejection::NoActiveQuestion);
        };

        if state.selected_option.is_some() {
            tracing::debug!(option, "selection ignored: reveal pending");
            return Selection::Ignored(Rejection::RevealPending);
        }

        let Some(question) = state.current_question() else {
            return Selection::Ignored(Rejection::NoActiveQuestion);
        };

        if !question.has_option(option) {
            tracing::debug!(option, "selection ignored: not an option of the current question");
            return Selection::Ignored(Rejection::UnknownOption);
        }

        let correct = question.is_correct(option);
        if correct {
            state.correct_count += 1;
        }
        state.selected_option = Some(option.to_string());
        state.answers.push(option.to_string());

        let token = RevealToken {
            round: self.round,
            question: state.current_index,
        };
        self.pending = Some(token);

        tracing::debug!(question = state.current_index, correct, "answer recorded");
        Selection::Accepted { token, correct }
    }

    /// Answer with the option at `index` in the current (shuffled) order.
    pub fn select_index(&mut self, index: usize) -> Selection {
        let option = self
            .current_question()
            .and_then(|q| q.options.get(index))
            .cloned();

        match option {
            Some(option) => self.select_option(&option),
            None => Selection::Ignored(Rejection::UnknownOption),
        }
    }

    /// End the reveal window started by `token`.
    ///
    /// Clears the selection and advances; the round is over after the last
    /// question. Returns false (and changes nothing) for stale tokens.
    pub fn finish_reveal(&mut self, token: RevealToken) -> bool {
        if self.pending != Some(token) {
            tracing::debug!(round = token.round, question = token.question, "stale reveal ignored");
            return false;
        }
        self.pending = None;

        let Some(state) = self.state.as_mut() else {
            return false;
        };

        state.selected_option = None;
        state.current_index += 1;
        if state.current_index >= state.round_questions.len() {
            state.current_index = state.round_questions.len();
            state.is_over = true;
            tracing::info!(
                correct = state.correct_count,
                total = state.round_questions.len(),
                "round complete"
            );
        }
        true
    }

    /// Integer percentage of correct answers, rounded half up.
    ///
    /// None when no round is loaded.
    pub fn score(&self) -> Option<u32> {
        let state = self.state.as_ref()?;
        percentage(state.correct_count, state.round_questions.len())
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        match &self.state {
            None => Phase::Idle,
            Some(state) if state.is_over => Phase::Complete,
            Some(state) if state.selected_option.is_some() => Phase::Revealing,
            Some(_) => Phase::InProgress,
        }
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.state.as_ref()?.current_question()
    }

    /// 1-based number of the question on screen.
    pub fn question_number(&self) -> Option<usize> {
        self.current_question()?;
        self.state.as_ref().map(|s| s.current_index + 1)
    }

    pub fn round_len(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.round_questions.len())
    }

    /// The reveal currently awaiting its timer, if any.
    pub fn pending_reveal(&self) -> Option<RevealToken> {
        self.pending
    }
}

/// round(100 × correct / total), half up. None for an empty round.
pub fn percentage(correct: usize, total: usize) -> Option<u32> {
    if total == 0 {
        return None;
    }
    let pct = (200 * correct + total) / (2 * total);
    u32::try_from(pct).ok()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bank_of(n: usize) -> QuestionBank {
        (0..n)
            .map(|i| QuestionRecord::new(format!("Q{}", i), ["right", "wrong", "other"], "right"))
            .collect::<Vec<_>>()
            .into()
    }

    fn started(n: usize) -> QuizSession {
        let mut session = QuizSession::new(bank_of(n), &RoundConfig::default());
        session.start_round(&mut StdRng::seed_from_u64(5)).unwrap();
        session
    }

    fn answer(session: &mut QuizSession, option: &str) -> bool {
        match session.select_option(option) {
            Selection::Accepted { token, .. } => session.finish_reveal(token),
            Selection::Ignored(r) => panic!("Expected Accepted, got {:?}", r),
        }
    }

    // -- Lifecycle --

    #[test]
    fn new_session_is_idle() {
        let session = QuizSession::new(bank_of(5), &RoundConfig::default());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.current_question().is_none());
        assert_eq!(session.score(), None);
        assert_eq!(session.round_len(), 0);
    }

    #[test]
    fn start_round_resets_everything() {
        let session = started(20);
        let state = session.state().unwrap();
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(state.round_questions.len(), 10);
        assert_eq!(state.current_index, 0);
        assert_eq!(state.correct_count, 0);
        assert_eq!(state.selected_option, None);
        assert!(!state.is_over);
    }

    #[test]
    fn three_question_bank_gives_three_question_round() {
        let session = started(3);
        assert_eq!(session.round_len(), 3);
    }

    #[test]
    fn empty_bank_stays_idle() {
        let mut session = QuizSession::new(QuestionBank::default(), &RoundConfig::default());
        let result = session.start_round(&mut StdRng::seed_from_u64(0));
        assert_eq!(result, Err(QuizError::EmptyQuestionBank));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn zero_round_size_is_rejected() {
        let config = RoundConfig {
            round_size: 0,
            ..Default::default()
        };
        let mut session = QuizSession::new(bank_of(3), &config);
        let result = session.start_round(&mut StdRng::seed_from_u64(0));
        assert_eq!(result, Err(QuizError::ZeroRoundSize));
        assert_eq!(session.phase(), Phase::Idle);
    }

    // -- Selection --

    #[test]
    fn correct_answer_increments_and_reveals() {
        let mut session = started(5);
        let selection = session.select_option("right");
        assert!(matches!(selection, Selection::Accepted { correct: true, .. }));
        assert_eq!(session.phase(), Phase::Revealing);
        let state = session.state().unwrap();
        assert_eq!(state.correct_count, 1);
        assert_eq!(state.selected_option.as_deref(), Some("right"));
        assert_eq!(state.current_index, 0, "index advances only after the reveal");
    }

    #[test]
    fn wrong_answer_keeps_count() {
        let mut session = started(5);
        let selection = session.select_option("wrong");
        assert!(matches!(selection, Selection::Accepted { correct: false, .. }));
        assert_eq!(session.state().unwrap().correct_count, 0);
    }

    #[test]
    fn second_selection_during_reveal_is_noop() {
        let mut session = started(5);
        let first = session.select_option("wrong");
        let second = session.select_option("right");

        assert!(matches!(first, Selection::Accepted { correct: false, .. }));
        assert_eq!(second, Selection::Ignored(Rejection::RevealPending));
        let state = session.state().unwrap();
        assert_eq!(state.correct_count, 0);
        assert_eq!(state.selected_option.as_deref(), Some("wrong"));
        assert_eq!(state.answers, vec!["wrong".to_string()]);
    }

    #[test]
    fn unknown_option_is_noop() {
        let mut session = started(5);
        assert_eq!(
            session.select_option("not there"),
            Selection::Ignored(Rejection::UnknownOption)
        );
        assert_eq!(session.phase(), Phase::InProgress);
    }

    #[test]
    fn selection_while_idle_is_noop() {
        let mut session = QuizSession::new(bank_of(5), &RoundConfig::default());
        assert_eq!(
            session.select_option("right"),
            Selection::Ignored(Rejection::NoActiveQuestion)
        );
    }

    #[test]
    fn select_index_uses_shuffled_order() {
        let mut session = started(5);
        let expected = session.current_question().unwrap().options[1].clone();
        session.select_index(1);
        assert_eq!(
            session.state().unwrap().selected_option.as_deref(),
            Some(expected.as_str())
        );
    }

    #[test]
    fn select_index_out_of_range_is_noop() {
        let mut session = started(5);
        assert_eq!(session.select_index(9), Selection::Ignored(Rejection::UnknownOption));
    }

    // -- Reveal --

    #[test]
    fn finish_reveal_advances_and_clears() {
        let mut session = started(5);
        assert!(answer(&mut session, "right"));
        let state = session.state().unwrap();
        assert_eq!(state.current_index, 1);
        assert_eq!(state.selected_option, None);
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.question_number(), Some(2));
    }

    #[test]
    fn last_reveal_completes_round() {
        let mut session = started(2);
        answer(&mut session, "right");
        answer(&mut session, "right");
        let state = session.state().unwrap();
        assert_eq!(session.phase(), Phase::Complete);
        assert!(state.is_over);
        assert_eq!(state.current_index, state.round_questions.len());
        assert!(session.current_question().is_none());
        assert_eq!(session.question_number(), None);
    }

    #[test]
    fn token_cannot_be_replayed() {
        let mut session = started(5);
        let Selection::Accepted { token, .. } = session.select_option("right") else {
            panic!("Expected Accepted");
        };
        assert!(session.finish_reveal(token));
        assert!(!session.finish_reveal(token));
        assert_eq!(session.state().unwrap().current_index, 1);
    }

    #[test]
    fn reset_during_reveal_discards_stale_timer() {
        let mut session = started(5);
        let Selection::Accepted { token, .. } = session.select_option("right") else {
            panic!("Expected Accepted");
        };

        session.reset(&mut StdRng::seed_from_u64(6)).unwrap();
        assert_eq!(session.pending_reveal(), None);

        assert!(!session.finish_reveal(token), "stale token must be ignored");
        let state = session.state().unwrap();
        assert_eq!(state.current_index, 0);
        assert_eq!(state.correct_count, 0);
        assert_eq!(session.phase(), Phase::InProgress);
    }

    #[test]
    fn stale_token_does_not_finish_new_reveal() {
        let mut session = started(5);
        let Selection::Accepted { token: old, .. } = session.select_option("right") else {
            panic!("Expected Accepted");
        };
        session.reset(&mut StdRng::seed_from_u64(6)).unwrap();
        session.select_option("wrong");

        assert!(!session.finish_reveal(old));
        assert_eq!(session.phase(), Phase::Revealing);
    }

    // -- Scoring --

    #[test]
    fn all_correct_scores_hundred() {
        let mut session = started(10);
        for _ in 0..10 {
            answer(&mut session, "right");
        }
        assert_eq!(session.score(), Some(100));
    }

    #[test]
    fn one_of_four_scores_twenty_five() {
        let mut session = started(4);
        answer(&mut session, "right");
        answer(&mut session, "wrong");
        answer(&mut session, "other");
        answer(&mut session, "wrong");
        assert_eq!(session.score(), Some(25));
    }

    #[test]
    fn score_is_idempotent() {
        let mut session = started(3);
        answer(&mut session, "right");
        let first = session.score();
        assert_eq!(session.score(), first);
        assert_eq!(session.score(), first);
    }

    #[test]
    fn correct_count_matches_answers() {
        let mut session = started(10);
        let picks = ["right", "wrong", "right", "other", "right", "right", "wrong", "right", "other", "right"];
        for pick in picks {
            answer(&mut session, pick);
        }
        let state = session.state().unwrap();
        let expected = state
            .answers
            .iter()
            .zip(&state.round_questions)
            .filter(|(a, q)| **a == q.correct_option)
            .count();
        assert_eq!(state.correct_count, expected);
        assert_eq!(state.correct_count, 6);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 4), Some(25));
        assert_eq!(percentage(2, 3), Some(67));
        assert_eq!(percentage(1, 3), Some(33));
        assert_eq!(percentage(1, 8), Some(13));
        assert_eq!(percentage(0, 10), Some(0));
        assert_eq!(percentage(0, 0), None);
    }
}
