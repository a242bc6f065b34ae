//! TUI color semantics and style constants.
//!
//! Pure data, consumed by the rendering layer.
//!
//! Color semantics:
//! - Green: correct answer during the reveal
//! - Red: the wrong pick during the reveal
//! - Magenta: the question box
//! - Yellow: perfect-round banner
//! - Cyan: interactive elements (keybinding hints, cursor)
//! - Dim: de-emphasized (progress, locked options)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Correct option, revealed.
pub const STYLE_CORRECT: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Wrong option picked, revealed.
pub const STYLE_INCORRECT: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Interactive element / keybinding hint.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized text.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Subtitle under the title.
pub const STYLE_SUBTITLE: Style = Style::new().fg(Color::Gray);

/// Question box border and text.
pub const STYLE_QUESTION: Style = Style::new().fg(Color::Magenta);

/// Cursor row in the option list.
pub const STYLE_CURSOR: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Final percentage.
pub const STYLE_SCORE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Perfect-round banner.
pub const STYLE_CONGRATS: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_styles_have_expected_colors() {
        assert_eq!(STYLE_CORRECT.fg, Some(Color::Green));
        assert_eq!(STYLE_INCORRECT.fg, Some(Color::Red));
        assert_eq!(STYLE_QUESTION.fg, Some(Color::Magenta));
        assert_eq!(STYLE_CONGRATS.fg, Some(Color::Yellow));
    }

    #[test]
    fn score_is_bold() {
        assert!(STYLE_SCORE.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn cursor_is_visible_on_default_background() {
        assert_eq!(STYLE_CURSOR.bg, Some(Color::Cyan));
    }
}
