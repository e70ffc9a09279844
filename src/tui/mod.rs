//! TUI module for testree.
//!
//! Provides a terminal user interface built on ratatui and crossterm: a tree
//! panel with aligned status glyphs next to the output of the last run.

pub mod app;
pub mod event;
pub mod ui;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;
