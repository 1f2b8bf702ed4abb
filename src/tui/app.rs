//! Main TUI application: the refresh loop.
//!
//! One logical thread of control runs sample → layout → render → input
//! per tick. Shutdown is cooperative: a quit key or interrupt moves the
//! lifecycle to `Stopping`, the in-flight frame completes, and the
//! terminal is restored before the process exits.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::collector::Collector;
use crate::config::DisplayConfig;
use crate::view;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::style::Palette;

/// Refresh loop state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Ticking normally.
    Running,
    /// Quit requested; the current frame still completes.
    Stopping,
    /// Loop exited, terminal restored.
    Stopped,
}

/// The refresh loop and its session state.
pub struct App {
    collector: Collector,
    config: DisplayConfig,
    art: String,
    config_path: Option<PathBuf>,
    /// Set by the signal handler; checked once per loop iteration.
    interrupted: Arc<AtomicBool>,
    lifecycle: Lifecycle,
}

impl App {
    pub fn new(
        collector: Collector,
        config: DisplayConfig,
        art: String,
        config_path: Option<PathBuf>,
        interrupted: Arc<AtomicBool>,
    ) -> Self {
        Self {
            collector,
            config,
            art,
            config_path,
            interrupted,
            lifecycle: Lifecycle::Running,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Runs the refresh loop until quit, restoring the terminal on the
    /// way out.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        self.lifecycle = Lifecycle::Stopped;
        info!("session ended");

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        // The palette is bound once per session; toggles change which
        // sections render, not the colors.
        let palette = Palette::bind(&self.config.colors);
        let tick_rate = Duration::from_secs_f64(self.config.refresh_rate.max(0.1));
        let events = EventHandler::new(tick_rate);

        let mut snapshot = self.collector.sample();

        while self.lifecycle == Lifecycle::Running {
            // Geometry comes fresh from the frame, so a resize is picked
            // up no later than one refresh interval after it happens.
            terminal.draw(|frame| {
                let area = frame.area();
                let plan = view::plan(
                    (area.width, area.height),
                    &self.config,
                    &self.art,
                    &snapshot,
                );
                render(frame, &plan, &palette);
            })?;

            // An interrupt counts as a normal quit; the frame above has
            // already completed in full.
            if self.interrupted.load(Ordering::Relaxed) {
                self.lifecycle = Lifecycle::Stopping;
                continue;
            }

            match events.next() {
                Ok(Event::Tick) => snapshot = self.collector.sample(),
                Ok(Event::Key(key)) => match handle_key(&mut self.config, key) {
                    KeyAction::Quit => self.lifecycle = Lifecycle::Stopping,
                    KeyAction::SaveConfig => self.save_config(),
                    KeyAction::None => {}
                },
                Ok(Event::Resize(width, height)) => {
                    debug!(width, height, "terminal resized");
                }
                Err(_) => self.lifecycle = Lifecycle::Stopping,
            }
        }

        Ok(())
    }

    fn save_config(&self) {
        let Some(path) = &self.config_path else {
            debug!("no config path supplied, ignoring save request");
            return;
        };
        match self.config.save(path) {
            Ok(()) => info!(path = %path.display(), "configuration saved"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to save configuration"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_app_starts_running() {
        let app = App::new(
            Collector::new(),
            DisplayConfig::default(),
            String::new(),
            None,
            Arc::new(AtomicBool::new(false)),
        );
        assert_eq!(app.lifecycle(), Lifecycle::Running);
    }
}
