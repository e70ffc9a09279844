//! Main rendering orchestration for the TUI.
//!
//! Composes the key-hint header, the tree panel, the output panel, and the
//! footer into one frame.

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tree::Tree;
use crate::tui::app::App;
use crate::tui::views::output_panel::render_output_panel;
use crate::tui::views::tree_panel::{render_tree_panel, tree_panel_width};
use crate::Status;

/// Key hints shown in the header panel.
pub const HEADER_HINTS: &str = "arrows: navigate | enter: expand/collapse | space: run | q: quit";

/// Title of the header panel.
const HEADER_TITLE: &str = concat!(" testree v", env!("CARGO_PKG_VERSION"), " ");

/// Renders the full layout: header, tree and output side by side, footer.
///
/// Records the output pane's inner width on `app` so scrolling can count
/// wrapped rows.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header panel
            Constraint::Min(3),    // tree + output
            Constraint::Length(1), // footer
        ])
        .split(area);

    let header = Paragraph::new(Line::from(Span::styled(
        HEADER_HINTS,
        Style::default().fg(Color::Cyan),
    )))
    .block(Block::default().borders(Borders::ALL).title(HEADER_TITLE));
    frame.render_widget(header, chunks[0]);

    // Tree panel hugs the alignment column; output takes the rest
    let tree_width = tree_panel_width(&app.tree, app.indent_width, app.symbols);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(tree_width), Constraint::Min(0)])
        .split(chunks[1]);
    app.output_width = body[1].width.saturating_sub(2);
    render_tree_panel(frame, body[0], &app.tree, app.indent_width, app.symbols);
    render_output_panel(frame, body[1], app.outcome.as_ref(), app.output_scroll);

    let footer = match &app.status_message {
        Some((message, expiry)) if Instant::now() < *expiry => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )),
        _ => Line::from(Span::styled(
            summary(&app.tree),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}

/// Footer summary: test count and leaf verdicts.
pub fn summary(tree: &Tree) -> String {
    let leaves: Vec<Status> = tree
        .ids()
        .map(|id| tree.node(id))
        .filter(|node| !node.is_directory())
        .map(|node| node.status())
        .collect();
    let passed = leaves.iter().filter(|s| **s == Status::Passed).count();
    let failed = leaves.iter().filter(|s| **s == Status::Failed).count();
    format!(
        "{} tests | {} passed | {} failed",
        leaves.len(),
        passed,
        failed
    )
}
