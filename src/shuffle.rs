//! Round sampling: uniform question selection and option shuffling.
//!
//! Both steps are Fisher-Yates (`SliceRandom::shuffle`). Callers pass the
//! RNG so rounds are reproducible under a fixed seed.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::types::{QuestionBank, QuestionRecord};

/// Draw up to `round_size` distinct questions uniformly without replacement.
///
/// Each returned record is a copy with its options independently shuffled.
/// Banks smaller than `round_size` contribute every question.
pub fn sample_round<R: Rng + ?Sized>(
    bank: &QuestionBank,
    round_size: usize,
    rng: &mut R,
) -> Vec<QuestionRecord> {
    let mut picks: Vec<&QuestionRecord> = bank.records().iter().collect();
    picks.shuffle(rng);
    picks.truncate(round_size);

    picks
        .into_iter()
        .map(|record| shuffle_options(record, rng))
        .collect()
}

/// Copy a record with its option order shuffled.
pub fn shuffle_options<R: Rng + ?Sized>(record: &QuestionRecord, rng: &mut R) -> QuestionRecord {
    let mut options = record.options.clone();
    options.shuffle(rng);
    QuestionRecord {
        question_text: record.question_text.clone(),
        options,
        correct_option: record.correct_option.clone(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
