//! Question bank loading and validation.
//!
//! Structure:
//! - Pure functions: parsing, record validation, path computation
//! - Effect functions: reading a bank file from disk

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BankError, RecordProblem};
use crate::types::{QuestionBank, QuestionRecord};

/// The dataset compiled into the binary.
const BUNDLED_QUESTIONS: &str = include_str!("../data/questions.json");

/// Bank filename inside the per-user config directory.
const BANK_FILENAME: &str = "questions.json";

/// Where a loaded bank came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankSource {
    /// The dataset shipped with the binary.
    Bundled,
    /// A JSON file on disk.
    File(PathBuf),
}

impl fmt::Display for BankSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankSource::Bundled => write!(f, "bundled questions"),
            BankSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// Parse and validate a bank from JSON text.
///
/// # Errors
/// Returns `BankError::Parse` for malformed JSON and
/// `BankError::InvalidRecord` for the first record that fails validation.
pub fn parse_bank(json: &str) -> Result<QuestionBank, BankError> {
    let records: Vec<QuestionRecord> = serde_json::from_str(json)?;

    for (index, record) in records.iter().enumerate() {
        validate_record(record).map_err(|problem| BankError::InvalidRecord { index, problem })?;
    }

    Ok(QuestionBank::new(records))
}

/// Check one record against the bank's shape rules.
pub fn validate_record(record: &QuestionRecord) -> Result<(), RecordProblem> {
    if record.question_text.trim().is_empty() {
        return Err(RecordProblem::BlankQuestion);
    }

    if record.options.len() < 2 {
        return Err(RecordProblem::TooFewOptions(record.options.len()));
    }

    let mut seen = HashSet::new();
    for option in &record.options {
        if !seen.insert(option.as_str()) {
            return Err(RecordProblem::DuplicateOption(option.clone()));
        }
    }

    if !record.has_option(&record.correct_option) {
        return Err(RecordProblem::AnswerNotAnOption(record.correct_option.clone()));
    }

    Ok(())
}

/// The bank shipped with the binary.
///
/// # Errors
/// Only fails if the bundled file itself is broken.
pub fn bundled_bank() -> Result<QuestionBank, BankError> {
    parse_bank(BUNDLED_QUESTIONS)
}

/// Returns the per-user bank override location.
///
/// On Linux: ~/.config/space-quiz/questions.json
/// On macOS: ~/Library/Application Support/space-quiz/questions.json
pub fn default_bank_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("space-quiz").join(BANK_FILENAME))
}

// ============================================================================
// EFFECT FUNCTIONS
// ============================================================================

/// Read and validate a bank file.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_bank(path: &Path) -> Result<QuestionBank, BankError> {
    let json = fs::read_to_string(path).map_err(|source| BankError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bank(&json)
}

/// Pick the bank to play with.
///
/// An explicit path wins. Otherwise the per-user override is used when it
/// exists, falling back to the bundled dataset.
///
/// # Errors
/// Returns an error if the chosen bank cannot be loaded.
pub fn resolve_bank(explicit: Option<PathBuf>) -> Result<(QuestionBank, BankSource), BankError> {
    let path = explicit.or_else(|| default_bank_path().filter(|p| p.is_file()));

    match path {
        Some(path) => {
            let bank = load_bank(&path)?;
            tracing::info!(path = %path.display(), questions = bank.len(), "loaded question bank");
            Ok((bank, BankSource::File(path)))
        }
        None => {
            let bank = bundled_bank()?;
            tracing::debug!(questions = bank.len(), "using bundled question bank");
            Ok((bank, BankSource::Bundled))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
