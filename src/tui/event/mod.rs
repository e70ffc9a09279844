//! Event handling for the TUI.
//!
//! Polls crossterm for input with the configured tick rate and maps keys onto
//! the core [`Command`] set plus a few view-only actions.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::Command;

/// Application-level event variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// No input arrived within one tick.
    Tick,
}

/// Blocking event source that yields a tick when input is idle.
#[derive(Debug, Clone, Copy)]
pub struct EventHandler {
    /// Longest wait for input before yielding [`Event::Tick`].
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll interval.
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Waits up to one tick for the next terminal event.
    ///
    /// Key releases, mouse, focus and paste events come back as ticks.
    pub fn next(&self) -> io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }
        Ok(match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
            _ => Event::Tick,
        })
    }
}

/// Action produced by handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action to take.
    None,
    /// A core command.
    Command(Command),
    /// Scroll the output pane toward the top.
    ScrollOutputUp,
    /// Scroll the output pane toward the bottom.
    ScrollOutputDown,
}

/// Maps a key press to an action.
///
/// Arrows and `h/j/k/l` move the cursor, Enter toggles a directory, Space
/// runs the selection, PageUp/PageDown scroll the output pane.
pub fn handle_key_event(key: KeyEvent) -> Action {
    if should_quit(key) {
        return Action::Command(Command::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::Command(Command::Up),
        KeyCode::Down | KeyCode::Char('j') => Action::Command(Command::Down),
        KeyCode::Left | KeyCode::Char('h') => Action::Command(Command::Left),
        KeyCode::Right | KeyCode::Char('l') => Action::Command(Command::Right),
        KeyCode::Enter => Action::Command(Command::Enter),
        KeyCode::Char(' ') => Action::Command(Command::RunSelected),
        KeyCode::PageUp => Action::ScrollOutputUp,
        KeyCode::PageDown => Action::ScrollOutputDown,
        _ => Action::None,
    }
}

/// Returns true if the key event should trigger application quit.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c')))
}
