//! Tree panel: one line per visible node, status glyphs on a shared column.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tree::{compute_alignment, render_rows, NodeId, RenderRow, SymbolSet, Tree};
use crate::Status;

const PANEL_TITLE: &str = " Tests ";

/// Returns the display color for a status glyph.
pub fn status_color(status: Status) -> Color {
    match status {
        Status::NotRun => Color::DarkGray,
        Status::Passed => Color::Green,
        Status::Failed => Color::Red,
    }
}

#[derive(Clone, Copy)]
enum Guide {
    Pipe,
    Tee,
    Elbow,
    Blank,
}

fn guide_glyph(guide: Guide, symbols: SymbolSet) -> &'static str {
    match (guide, symbols) {
        (Guide::Pipe, SymbolSet::Unicode) => "│",
        (Guide::Tee, SymbolSet::Unicode) => "├──",
        (Guide::Elbow, SymbolSet::Unicode) => "└──",
        (Guide::Pipe, SymbolSet::Ascii) => "|",
        (Guide::Tee, SymbolSet::Ascii) => "|--",
        (Guide::Elbow, SymbolSet::Ascii) => "`--",
        (Guide::Blank, _) => "",
    }
}

/// Fits a guide glyph into exactly `width` columns.
fn guide_cell(guide: Guide, symbols: SymbolSet, width: usize) -> String {
    let glyph: String = guide_glyph(guide, symbols).chars().take(width).collect();
    let pad = width.saturating_sub(glyph.width());
    format!("{glyph}{}", " ".repeat(pad))
}

fn is_last_child(tree: &Tree, id: NodeId) -> bool {
    match tree.index_in_parent(id) {
        Some(i) => i + 1 == tree.siblings(id).len(),
        None => true,
    }
}

/// Box-drawing guides occupying a row's indentation.
///
/// Each tree level takes exactly `indent_width` columns, so the guides stand
/// in for the plain indent without moving the status column.
pub fn guide_prefix(tree: &Tree, id: NodeId, indent_width: usize, symbols: SymbolSet) -> String {
    // ancestors below the root, outermost first, then the node itself
    let mut chain = Vec::new();
    let mut current = Some(id);
    while let Some(node) = current {
        if tree.node(node).parent().is_some() {
            chain.push(node);
        }
        current = tree.node(node).parent();
    }
    chain.reverse();

    let Some((&own, ancestors)) = chain.split_last() else {
        return String::new();
    };
    let mut prefix = String::new();
    for &ancestor in ancestors {
        let guide = if is_last_child(tree, ancestor) {
            Guide::Blank
        } else {
            Guide::Pipe
        };
        prefix.push_str(&guide_cell(guide, symbols, indent_width));
    }
    let own_guide = if is_last_child(tree, own) {
        Guide::Elbow
    } else {
        Guide::Tee
    };
    prefix.push_str(&guide_cell(own_guide, symbols, indent_width));
    prefix
}

/// Styled line for one row.
pub fn format_row_line(
    tree: &Tree,
    row: &RenderRow,
    indent_width: usize,
    symbols: SymbolSet,
) -> Line<'static> {
    let label_style = if row.is_directory {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(
            guide_prefix(tree, row.id, indent_width, symbols),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(row.label.clone(), label_style),
        Span::raw(" ".repeat(row.trailing_spaces + 1)),
        Span::styled(row.status_symbol, Style::default().fg(status_color(row.status))),
    ])
}

/// Outer width that fits every row plus borders.
pub fn tree_panel_width(tree: &Tree, indent_width: usize, symbols: SymbolSet) -> u16 {
    let symbol_width = symbols.status_symbol(Status::NotRun).width();
    let rows = compute_alignment(tree, indent_width) + 1 + symbol_width;
    let width = rows.max(PANEL_TITLE.len()) + 2;
    u16::try_from(width).unwrap_or(u16::MAX)
}

/// Renders the tree panel with the cursor row highlighted.
pub fn render_tree_panel(
    frame: &mut Frame,
    area: Rect,
    tree: &Tree,
    indent_width: usize,
    symbols: SymbolSet,
) {
    let rows = render_rows(tree, indent_width, symbols);
    let selected = rows.iter().position(|row| row.emphasized);
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(format_row_line(tree, row, indent_width, symbols)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(PANEL_TITLE))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::REVERSED)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}
