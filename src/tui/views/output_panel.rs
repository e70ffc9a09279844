//! Output panel: captured text of the last run.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::RunOutcome;
use crate::Status;

/// Shown until the first run.
pub const OUTPUT_PLACEHOLDER: &str = "Run a test to see the output here";

/// Border color for the panel: green after a pass, red after a failure or
/// when the runner could not start.
pub fn border_color(outcome: Option<&RunOutcome>) -> Color {
    match outcome {
        None => Color::Reset,
        Some(RunOutcome::Finished(report)) if report.status == Status::Passed => Color::Green,
        Some(_) => Color::Red,
    }
}

fn title(outcome: Option<&RunOutcome>) -> String {
    match outcome {
        None => " Output ".to_string(),
        Some(RunOutcome::Finished(report)) => {
            format!(" {} [{}] ", report.target, report.status)
        }
        Some(RunOutcome::RunnerFailed { target, .. }) => format!(" {target} [error] "),
    }
}

fn body(outcome: Option<&RunOutcome>) -> Text<'_> {
    match outcome {
        None => Text::from(Line::from(Span::styled(
            OUTPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))),
        Some(RunOutcome::Finished(report)) => Text::raw(report.output.as_str()),
        Some(RunOutcome::RunnerFailed { message, .. }) => Text::from(Line::from(Span::styled(
            format!("Error: {message}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))),
    }
}

fn paragraph(outcome: Option<&RunOutcome>) -> Paragraph<'_> {
    Paragraph::new(body(outcome)).wrap(Wrap { trim: false })
}

/// Screen rows the panel body takes once wrapped to `inner_width` columns.
///
/// With no known width (nothing drawn yet) this is the logical line count.
pub fn wrapped_line_count(outcome: Option<&RunOutcome>, inner_width: u16) -> usize {
    if inner_width == 0 {
        return body(outcome).lines.len();
    }
    paragraph(outcome).line_count(inner_width)
}

/// Renders the output panel, scrolled down by `scroll` wrapped rows.
pub fn render_output_panel(frame: &mut Frame, area: Rect, outcome: Option<&RunOutcome>, scroll: u16) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(outcome)))
        .title(title(outcome));
    frame.render_widget(paragraph(outcome).block(block).scroll((scroll, 0)), area);
}
