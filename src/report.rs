//! Report formatting for finished rounds and question banks.
//!
//! Pure functions: (report, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::bank::BankSource;
use crate::session::{QuizSession, percentage};
use crate::types::{OutputFormat, QuestionBank, RoundConfig};

// ============================================================================
// ROUND SUMMARY
// ============================================================================

/// One answered question, for the end-of-round recap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub question: String,
    pub chosen: String,
    pub correct_option: String,
    pub correct: bool,
}

/// Outcome of a round (complete or abandoned part-way).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    /// Questions in the round.
    pub total: usize,
    /// Questions answered before the summary was taken.
    pub answered: usize,
    /// Correct answers.
    pub correct: usize,
    /// round(100 × correct / total).
    pub score_percent: u32,
    /// Every question answered and every answer correct.
    pub perfect: bool,
    pub answers: Vec<AnswerRecord>,
}

impl RoundSummary {
    /// Summarize the session's current round. None when no round is loaded.
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let state = session.state()?;
        let total = state.round_questions.len();

        let answers: Vec<AnswerRecord> = state
            .answers
            .iter()
            .zip(&state.round_questions)
            .map(|(chosen, question)| AnswerRecord {
                question: question.question_text.clone(),
                chosen: chosen.clone(),
                correct_option: question.correct_option.clone(),
                correct: question.is_correct(chosen),
            })
            .collect();

        Some(RoundSummary {
            total,
            answered: answers.len(),
            correct: state.correct_count,
            score_percent: percentage(state.correct_count, total)?,
            perfect: state.is_over && state.correct_count == total,
            answers,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.answered == self.total
    }
}

/// Format a round summary for output.
pub fn format_summary(summary: &RoundSummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_summary_human(summary),
        OutputFormat::Json => to_json(summary),
    }
}

fn format_summary_human(summary: &RoundSummary) -> String {
    let mut out = String::new();

    if !summary.answers.is_empty() {
        out.push_str("=== Answers ===\n");
        for (i, answer) in summary.answers.iter().enumerate() {
            let mark = if answer.correct { "✓" } else { "✗" };
            out.push_str(&format!("{:>2}. {} {}\n", i + 1, mark, answer.question));
            if answer.correct {
                out.push_str(&format!("      {}\n", answer.chosen));
            } else {
                out.push_str(&format!(
                    "      {} (correct: {})\n",
                    answer.chosen, answer.correct_option
                ));
            }
        }
        out.push('\n');
    }

    out.push_str("=== Result ===\n");
    if !summary.is_complete() {
        out.push_str(&format!(
            "Round abandoned after {} of {} questions.\n",
            summary.answered, summary.total
        ));
    }
    if summary.perfect {
        out.push_str("Congratulations! You got every question right!\n");
    }
    out.push_str(&format!(
        "Correct: {}/{} ({}%)\n",
        summary.correct, summary.total, summary.score_percent
    ));

    out
}

// ============================================================================
// BANK REPORT
// ============================================================================

/// Shape of a question bank, for `check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankReport {
    pub source: String,
    pub questions: usize,
    pub min_options: usize,
    pub max_options: usize,
    /// Questions a round over this bank will contain.
    pub round_len: usize,
    /// Requested round size.
    pub round_size: usize,
}

impl BankReport {
    pub fn new(bank: &QuestionBank, source: &BankSource, config: &RoundConfig) -> Self {
        let option_counts = bank.records().iter().map(|r| r.options.len());
        BankReport {
            source: source.to_string(),
            questions: bank.len(),
            min_options: option_counts.clone().min().unwrap_or(0),
            max_options: option_counts.max().unwrap_or(0),
            round_len: config.round_len(bank),
            round_size: config.round_size,
        }
    }

    /// The bank can't fill a full round.
    pub fn is_short(&self) -> bool {
        self.round_len < self.round_size
    }
}

/// Format a bank report for output.
pub fn format_bank_report(report: &BankReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_bank_human(report),
        OutputFormat::Json => to_json(report),
    }
}

fn format_bank_human(report: &BankReport) -> String {
    let mut out = String::new();
    out.push_str("=== Question Bank ===\n");
    out.push_str(&format!("Source:    {}\n", report.source));
    out.push_str(&format!("Questions: {}\n", report.questions));
    if report.questions > 0 {
        out.push_str(&format!(
            "Options:   {}-{} per question\n",
            report.min_options, report.max_options
        ));
    }
    out.push_str(&format!("Round:     {} questions\n", report.round_len));

    if report.questions == 0 {
        out.push_str("\nNote: the bank is empty; no round can be played.\n");
    } else if report.is_short() {
        out.push_str(&format!(
            "\nNote: fewer than {} questions available; rounds will be shorter.\n",
            report.round_size
        ));
    }

    out
}

fn to_json<T: Serialize>(value: &T) -> String {
    let mut json =
        serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
    json.push('\n');
    json
}

// ============================================================================
// TESTS
// ============================================================================
