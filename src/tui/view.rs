//! Pure rendering: map App state to ratatui widget trees.
//!
//! The main `render()` dispatches on the session phase. Widget-building
//! functions are pure (state in, widgets out); the only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::session::{Phase, SessionState};
use crate::types::QuestionRecord;

use super::state::App;
use super::theme;

const TITLE: &str = "SPACE QUIZ";
const SUBTITLE: &str = "Questions from Another World!";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title + subtitle at top, content in middle, help at bottom
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Length(1), // subtitle
        Constraint::Length(1), // spacer
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    let phase = app.session.phase();

    frame.render_widget(render_title(), chunks[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(SUBTITLE, theme::STYLE_SUBTITLE)).centered(),
        chunks[1],
    );
    frame.render_widget(render_help(phase), chunks[4]);

    let content_area = chunks[3];

    match (phase, app.session.state()) {
        (Phase::InProgress | Phase::Revealing, Some(state)) => {
            render_question(state, app.cursor, phase, frame, content_area);
        }
        (Phase::Complete, Some(state)) => {
            render_result(state, frame, content_area);
        }
        // No round loaded: never render a question
        _ => render_idle(frame, content_area),
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title() -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(TITLE, theme::STYLE_TITLE))).centered()
}

/// Help line showing available keybindings for the current phase.
fn render_help(phase: Phase) -> Paragraph<'static> {
    let help_text = match phase {
        Phase::Idle => "[r] start  [q] quit",
        Phase::InProgress => "[j/k] move  [Enter] answer  [1-9] pick  [r] restart  [q] quit",
        Phase::Revealing => "[r] restart  [q] quit",
        Phase::Complete => "[r] retry  [q] quit",
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// SCREEN: IDLE
// ============================================================================

fn render_idle(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("  No questions loaded.", theme::STYLE_DIM)),
    ];
    frame.render_widget(Paragraph::new(text), area);
}

// ============================================================================
// SCREEN: QUESTION
// ============================================================================

fn render_question(
    state: &SessionState,
    cursor: usize,
    phase: Phase,
    frame: &mut Frame,
    area: Rect,
) {
    let Some(question) = state.current_question() else {
        render_idle(frame, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // progress
        Constraint::Length(5), // question box
        Constraint::Min(0),    // options
    ])
    .split(area);

    let progress = Line::from(vec![
        Span::styled(
            format!(
                "  Question {}/{}",
                state.current_index + 1,
                state.round_questions.len()
            ),
            theme::STYLE_DIM,
        ),
        Span::styled(format!("    Correct: {}", state.correct_count), theme::STYLE_DIM),
    ]);
    frame.render_widget(Paragraph::new(progress), chunks[0]);

    let question_box = Paragraph::new(Span::styled(
        question.question_text.as_str(),
        theme::STYLE_IMPORTANT,
    ))
    .centered()
    .wrap(Wrap { trim: true })
    .block(Block::bordered().border_style(theme::STYLE_QUESTION));
    frame.render_widget(question_box, chunks[1]);

    let revealed = match phase {
        Phase::Revealing => state.selected_option.as_deref(),
        _ => None,
    };
    let options = option_lines(question, cursor, revealed);
    frame.render_widget(Paragraph::new(options).wrap(Wrap { trim: false }), chunks[2]);
}

/// One line per option. With `revealed` set, the correct option is marked
/// green and a wrong pick red; the cursor is hidden.
fn option_lines<'a>(
    question: &'a QuestionRecord,
    cursor: usize,
    revealed: Option<&str>,
) -> Vec<Line<'a>> {
    question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let label = format!("  [{}] ", i + 1);

            match revealed {
                Some(picked) => {
                    let (style, mark) = if question.is_correct(option) {
                        (theme::STYLE_CORRECT, "  ✓")
                    } else if option == picked {
                        (theme::STYLE_INCORRECT, "  ✗")
                    } else {
                        (theme::STYLE_DIM, "")
                    };
                    Line::from(vec![
                        Span::styled(label, style),
                        Span::styled(option.as_str(), style),
                        Span::styled(mark, style),
                    ])
                }
                None if i == cursor => Line::from(vec![
                    Span::raw(label),
                    Span::raw(option.as_str()),
                ])
                .style(theme::STYLE_CURSOR),
                None => Line::from(vec![
                    Span::styled(label, theme::STYLE_INTERACTIVE),
                    Span::raw(option.as_str()),
                ]),
            }
        })
        .collect()
}

// ============================================================================
// SCREEN: RESULT
// ============================================================================

fn render_result(state: &SessionState, frame: &mut Frame, area: Rect) {
    let total = state.round_questions.len();
    let mut lines = vec![Line::from("")];

    if state.correct_count == total {
        lines.push(
            Line::from(Span::styled(
                "Congratulations! You got every question right!",
                theme::STYLE_CONGRATS,
            ))
            .centered(),
        );
    } else {
        let pct = crate::session::percentage(state.correct_count, total).unwrap_or(0);
        lines.push(Line::from("You got").centered());
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("{}%", pct), theme::STYLE_SCORE)).centered());
    }

    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled(
            format!("{} of {} correct", state.correct_count, total),
            theme::STYLE_DIM,
        ))
        .centered(),
    );
    lines.push(Line::from(""));
    lines.push(
        Line::from(vec![
            Span::styled("[r] ", theme::STYLE_INTERACTIVE),
            Span::raw("Retry"),
        ])
        .centered(),
    );

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// TESTS
// ============================================================================
