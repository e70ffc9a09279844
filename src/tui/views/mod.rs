/// Captured output of the last run.
pub mod output_panel;

/// Aligned test tree with status glyphs.
pub mod tree_panel;
