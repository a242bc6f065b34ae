//! TUI module for the interactive quiz.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Action, Transition)
//! - `update`: pure transitions over App
//! - `view`: pure rendering
//! - `theme`: color semantics
//! - `run`: effects (terminal, threads, timer, RNG)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
