//! Row layout with a shared status column.
//!
//! Each visible row ends with a status glyph. All glyphs sit in one column,
//! the widest `depth * indent + label width` among visible rows, so the
//! column moves as directories open and close. It is recomputed from the
//! live expand state every time rows are produced.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use super::{Node, NodeId, Tree};
use crate::Status;

/// Columns of indentation per tree level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Glyph family used for status indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolSet {
    /// `○` `✓` `✗`
    #[default]
    Unicode,
    /// `[ ]` `[+]` `[x]`
    Ascii,
}

impl SymbolSet {
    /// Glyph for a status. Every glyph within a set has the same width.
    pub fn status_symbol(self, status: Status) -> &'static str {
        match (self, status) {
            (SymbolSet::Unicode, Status::NotRun) => "○",
            (SymbolSet::Unicode, Status::Passed) => "✓",
            (SymbolSet::Unicode, Status::Failed) => "✗",
            (SymbolSet::Ascii, Status::NotRun) => "[ ]",
            (SymbolSet::Ascii, Status::Passed) => "[+]",
            (SymbolSet::Ascii, Status::Failed) => "[x]",
        }
    }
}

/// Backend-agnostic description of one visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRow {
    /// Node this row shows.
    pub id: NodeId,
    /// Tree depth, root is 0.
    pub depth: usize,
    /// Leading columns: `depth * indent_width`.
    pub indent: usize,
    /// Display label (file suffix stripped for directories).
    pub label: String,
    /// Whether the node is a directory.
    pub is_directory: bool,
    /// Whether the node is an expanded directory.
    pub expanded: bool,
    /// Set on the cursor row.
    pub emphasized: bool,
    /// Last-run status.
    pub status: Status,
    /// Glyph for `status`.
    pub status_symbol: &'static str,
    /// Padding between the label and the status column.
    pub trailing_spaces: usize,
}

impl fmt::Display for RenderRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:indent$}{}{:trailing$} {}",
            "",
            self.label,
            "",
            self.status_symbol,
            indent = self.indent,
            trailing = self.trailing_spaces,
        )
    }
}

/// Label shown for a node: directories lose a trailing `.ext` suffix.
pub fn display_label(node: &Node) -> &str {
    let name = node.name();
    if !node.is_directory() {
        return name;
    }
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => name,
    }
}

/// Terminal cell width of [`display_label`].
pub fn display_width(node: &Node) -> usize {
    display_label(node).width()
}

/// Column right after a node's label: `depth * indent_width + display_width`.
pub fn self_position(tree: &Tree, id: NodeId, indent_width: usize) -> usize {
    tree.depth(id) * indent_width + display_width(tree.node(id))
}

/// Shared status column for the current expand state.
///
/// Leaves and collapsed directories contribute their own position; an
/// expanded directory contributes the max of its own and its children's.
pub fn compute_alignment(tree: &Tree, indent_width: usize) -> usize {
    subtree_column(tree, tree.root(), 0, indent_width)
}

fn subtree_column(tree: &Tree, id: NodeId, depth: usize, indent_width: usize) -> usize {
    let node = tree.node(id);
    let own = depth * indent_width + display_width(node);
    if !node.is_expanded() {
        return own;
    }
    node.children()
        .iter()
        .map(|&child| subtree_column(tree, child, depth + 1, indent_width))
        .fold(own, usize::max)
}

/// Visible nodes in depth-first pre-order, skipping collapsed subtrees.
pub fn visible_rows(tree: &Tree) -> Vec<NodeId> {
    let mut rows = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        rows.push(id);
        let node = tree.node(id);
        if node.is_expanded() {
            stack.extend(node.children().iter().rev().copied());
        }
    }
    rows
}

/// Describes one row against a precomputed column.
pub fn render_row(
    tree: &Tree,
    id: NodeId,
    column: usize,
    indent_width: usize,
    symbols: SymbolSet,
) -> RenderRow {
    let node = tree.node(id);
    let depth = tree.depth(id);
    let indent = depth * indent_width;
    let position = indent + display_width(node);
    RenderRow {
        id,
        depth,
        indent,
        label: display_label(node).to_string(),
        is_directory: node.is_directory(),
        expanded: node.is_expanded(),
        emphasized: node.is_selected(),
        status: node.status(),
        status_symbol: symbols.status_symbol(node.status()),
        trailing_spaces: column.saturating_sub(position),
    }
}

/// Rows for every visible node, aligned on a freshly computed column.
pub fn render_rows(tree: &Tree, indent_width: usize, symbols: SymbolSet) -> Vec<RenderRow> {
    let column = compute_alignment(tree, indent_width);
    visible_rows(tree)
        .into_iter()
        .map(|id| render_row(tree, id, column, indent_width, symbols))
        .collect()
}
