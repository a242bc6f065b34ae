//! Error types for bank loading and round setup.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// What is wrong with a single bank record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordProblem {
    #[error("question text is blank")]
    BlankQuestion,
    #[error("needs at least 2 options, found {0}")]
    TooFewOptions(usize),
    #[error("option {0:?} appears more than once")]
    DuplicateOption(String),
    #[error("answer {0:?} is not one of the options")]
    AnswerNotAnOption(String),
}

/// Errors emitted while loading a question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed question bank: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question #{}: {problem}", .index + 1)]
    InvalidRecord { index: usize, problem: RecordProblem },
}

/// Errors emitted by the session controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question bank is empty, nothing to ask")]
    EmptyQuestionBank,
    #[error("round size must be at least 1")]
    ZeroRoundSize,
}
