//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.
//! The canonical cursor lives here and is threaded through every navigation
//! call; the tree's `selected` flags mirror it for rendering.

use std::fmt;
use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{CrosstermBackend, Terminal};

use crate::runner::{run_selected, run_target, RunReport, TestRunner};
use crate::tree::{navigate, NodeId, SymbolSet, Tree, DEFAULT_INDENT_WIDTH};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui::render;
use crate::tui::views::output_panel::wrapped_line_count;
use crate::Command;

/// How long footer messages stay visible.
pub const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Lines moved per PageUp/PageDown in the output pane.
pub const OUTPUT_SCROLL_STEP: u16 = 10;

/// Result of the most recent run request, shown in the output pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The runner started and exited.
    Finished(RunReport),
    /// The runner could not be started.
    RunnerFailed {
        /// Target that was requested.
        target: String,
        /// Error description.
        message: String,
    },
}

/// Core application state for the TUI.
pub struct App {
    /// The test tree being navigated.
    pub tree: Tree,
    /// Node under the cursor.
    pub cursor: NodeId,
    /// Result of the last run, `None` until something has run.
    pub outcome: Option<RunOutcome>,
    /// First visible wrapped row of the output pane.
    pub output_scroll: u16,
    /// Inner width of the output pane at the last draw, 0 before the first.
    pub output_width: u16,
    /// Temporary message shown in the footer, with expiry time.
    pub status_message: Option<(String, Instant)>,
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Columns of indentation per tree level.
    pub indent_width: usize,
    /// Glyphs for status indicators and guides.
    pub symbols: SymbolSet,
    /// Input poll interval.
    pub tick_rate: Duration,
    runner: Box<dyn TestRunner>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("tree", &self.tree)
            .field("cursor", &self.cursor)
            .field("outcome", &self.outcome)
            .field("output_scroll", &self.output_scroll)
            .field("output_width", &self.output_width)
            .field("status_message", &self.status_message)
            .field("should_quit", &self.should_quit)
            .field("indent_width", &self.indent_width)
            .field("symbols", &self.symbols)
            .field("tick_rate", &self.tick_rate)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Creates an app with the cursor on the tree's root.
    pub fn new(tree: Tree, runner: Box<dyn TestRunner>) -> Self {
        let cursor = tree.root();
        Self {
            tree,
            cursor,
            outcome: None,
            output_scroll: 0,
            output_width: 0,
            status_message: None,
            should_quit: false,
            indent_width: DEFAULT_INDENT_WIDTH,
            symbols: SymbolSet::default(),
            tick_rate: Duration::from_millis(250),
            runner,
        }
    }

    /// Sets indentation and glyph family.
    pub fn with_view_options(mut self, indent_width: usize, symbols: SymbolSet) -> Self {
        self.indent_width = indent_width;
        self.symbols = symbols;
        self
    }

    /// Sets the input poll interval.
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Applies a core command.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::RunSelected => self.run_selected(),
            movement => self.cursor = navigate(&mut self.tree, self.cursor, movement),
        }
    }

    /// Applies any key-derived action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Command(command) => self.dispatch(command),
            Action::ScrollOutputUp => self.scroll_output_up(),
            Action::ScrollOutputDown => self.scroll_output_down(),
        }
    }

    /// Target the cursor would run.
    pub fn selected_target(&self) -> String {
        run_target(&self.tree, self.cursor)
    }

    /// Posts the "running" notice shown while a run blocks.
    pub fn announce_run(&mut self) {
        let message = format!("Running {}…", self.selected_target());
        self.set_status_message(message);
    }

    fn run_selected(&mut self) {
        match run_selected(&mut self.tree, self.cursor, self.runner.as_ref()) {
            Ok(report) => {
                self.set_status_message(format!("{} {}", report.target, report.status));
                self.outcome = Some(RunOutcome::Finished(report));
            }
            Err(e) => {
                let target = self.selected_target();
                self.set_status_message(format!("Could not run {target}"));
                self.outcome = Some(RunOutcome::RunnerFailed {
                    target,
                    message: e.to_string(),
                });
            }
        }
        self.output_scroll = 0;
    }

    fn output_line_count(&self) -> usize {
        match &self.outcome {
            Some(outcome @ RunOutcome::Finished(_)) => {
                wrapped_line_count(Some(outcome), self.output_width)
            }
            _ => 0,
        }
    }

    /// Scrolls the output pane up by one step.
    pub fn scroll_output_up(&mut self) {
        self.output_scroll = self.output_scroll.saturating_sub(OUTPUT_SCROLL_STEP);
    }

    /// Scrolls the output pane down by one step, stopping at the last
    /// wrapped row.
    pub fn scroll_output_down(&mut self) {
        let last_line = u16::try_from(self.output_line_count().saturating_sub(1)).unwrap_or(u16::MAX);
        self.output_scroll = self
            .output_scroll
            .saturating_add(OUTPUT_SCROLL_STEP)
            .min(last_line);
    }

    fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now() + STATUS_MESSAGE_TTL));
    }

    /// Clears the status message if its expiry time has passed.
    pub fn expire_status_message(&mut self) {
        if let Some((_, expiry)) = &self.status_message {
            if Instant::now() >= *expiry {
                self.status_message = None;
            }
        }
    }

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub fn run(&mut self) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop();

        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events until quit.
    fn event_loop(&mut self) -> io::Result<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        let events = EventHandler::new(self.tick_rate);

        while !self.should_quit {
            terminal.draw(|frame| render(frame, self))?;

            match events.next()? {
                Event::Key(key) => {
                    let action = handle_key_event(key);
                    if action == Action::Command(Command::RunSelected) {
                        // runs block; show what is running first
                        self.announce_run();
                        terminal.draw(|frame| render(frame, self))?;
                    }
                    self.apply(action);
                }
                Event::Tick => self.expire_status_message(),
                Event::Resize(_, _) => {}
            }
        }
        Ok(())
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests;
