//! space-quiz: a terminal multiple-choice quiz with shuffled rounds.

pub mod bank;
pub mod error;
pub mod report;
pub mod session;
pub mod shuffle;
pub mod timer;
pub mod tui;
pub mod types;
