//! Domain types for space-quiz.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of questions in a round when the bank is large enough.
pub const DEFAULT_ROUND_SIZE: usize = 10;

/// How long the correct/incorrect highlight stays up before advancing.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_secs(1);

// ============================================================================
// QUESTIONS
// ============================================================================

/// One multiple-choice question as stored in the bank.
///
/// Field names on the wire follow the bundled data file:
/// `{ "question": ..., "options": [...], "answer": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Prompt shown above the options.
    #[serde(rename = "question")]
    pub question_text: String,
    /// Option texts. At least two, no duplicates.
    pub options: Vec<String>,
    /// The correct option, verbatim one of `options`.
    #[serde(rename = "answer")]
    pub correct_option: String,
}

impl QuestionRecord {
    pub fn new(
        question_text: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_option: impl Into<String>,
    ) -> Self {
        QuestionRecord {
            question_text: question_text.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_option: correct_option.into(),
        }
    }

    /// Whether `option` is one of this question's options.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Whether `option` is the correct answer.
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_option == option
    }
}

/// The immutable corpus every round is drawn from.
///
/// The session controller never mutates it; a round gets its own
/// shuffled copies of the sampled records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        QuestionBank { records }
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<QuestionRecord>> for QuestionBank {
    fn from(records: Vec<QuestionRecord>) -> Self {
        QuestionBank::new(records)
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Configuration for a quiz round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundConfig {
    /// Maximum questions per round. Smaller banks give shorter rounds.
    pub round_size: usize,
    /// Reveal window length after each answer.
    pub reveal_delay: Duration,
    /// Fixed RNG seed for reproducible rounds (None = OS entropy).
    pub seed: Option<u64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            round_size: DEFAULT_ROUND_SIZE,
            reveal_delay: DEFAULT_REVEAL_DELAY,
            seed: None,
        }
    }
}

impl RoundConfig {
    /// Number of questions a round over `bank` will contain.
    pub fn round_len(&self, bank: &QuestionBank) -> usize {
        self.round_size.min(bank.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================
