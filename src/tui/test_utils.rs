//! Shared test utilities for TUI testing with ratatui TestBackend.

#![cfg(test)]

use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};

use crate::tui::app::App;

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Checks if a specific row contains the given substring.
pub fn row_contains(buffer: &Buffer, row: u16, text: &str) -> bool {
    row_text(buffer, row).contains(text)
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    (0..buffer.area().height).find(|&row| row_contains(buffer, row, text))
}

/// Asserts that the cell at (col, row) has the specified foreground color.
pub fn assert_fg_color(buffer: &Buffer, col: u16, row: u16, color: Color) {
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.fg, color,
        "expected fg color {:?} at ({}, {}), got {:?}",
        color, col, row, cell.fg
    );
}

/// Renders the whole app to a buffer for inspection.
pub fn render_app_to_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| crate::tui::ui::render(frame, app))
        .expect("draw failed");
    terminal.backend().buffer().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_terminal_creates_terminal() {
        let terminal = test_terminal(80, 24);
        let size = terminal.size().expect("should have size");
        assert_eq!(size.width, 80);
        assert_eq!(size.height, 24);
    }

    #[test]
    fn test_row_text_out_of_range_is_empty() {
        let terminal = test_terminal(10, 2);
        assert_eq!(row_text(terminal.backend().buffer(), 5), "");
    }

    #[test]
    fn test_find_row_with_text_returns_row_index() {
        let mut terminal = test_terminal(40, 10);
        terminal
            .draw(|frame| {
                use ratatui::layout::{Constraint, Direction, Layout};
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Length(1)])
                    .split(frame.area());
                frame.render_widget(ratatui::widgets::Paragraph::new("First Line"), chunks[0]);
                frame.render_widget(ratatui::widgets::Paragraph::new("Target Row"), chunks[1]);
            })
            .expect("draw failed");
        let buffer = terminal.backend().buffer();
        assert_eq!(find_row_with_text(buffer, "Target Row"), Some(1));
        assert_eq!(find_row_with_text(buffer, "Missing"), None);
    }
}
